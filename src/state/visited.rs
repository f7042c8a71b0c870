//! Visited sets for a single harvest run
//!
//! Both sets grow monotonically and are discarded with the engine that owns
//! them; nothing is carried over between runs.

use crate::crawler::Fingerprint;
use std::collections::HashSet;

/// URL-level and content-level dedup state
#[derive(Debug, Default, Clone)]
pub struct VisitedState {
    /// URLs already dispatched to the engine
    urls: HashSet<String>,

    /// Fingerprints of text blocks already written to the sink
    content: HashSet<Fingerprint>,
}

impl VisitedState {
    /// Creates empty visited sets
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as dispatched
    ///
    /// Returns `true` if the URL was not seen before. Callers must mark a
    /// URL before fetching it.
    pub fn mark_url(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    /// Returns true if the URL has already been dispatched
    pub fn has_url(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Records a content fingerprint
    ///
    /// Returns `true` if the fingerprint is new, meaning the block it was
    /// computed from must be written now.
    pub fn record_content(&mut self, fingerprint: Fingerprint) -> bool {
        self.content.insert(fingerprint)
    }

    /// Returns true if a block with this fingerprint was already written
    pub fn has_content(&self, fingerprint: &Fingerprint) -> bool {
        self.content.contains(fingerprint)
    }

    /// Number of URLs dispatched so far
    pub fn url_count(&self) -> usize {
        self.urls.len()
    }

    /// Number of distinct blocks written so far
    pub fn content_count(&self) -> usize {
        self.content.len()
    }
}
