//! Crawl engine - depth-first harvest orchestration
//!
//! For every page it visits, the engine discovers outbound links, and for each
//! link the allow-list accepts it fetches the target, appends its novel text
//! blocks to the sink, pauses, and descends into the target before moving on
//! to the next sibling link.
//!
//! Traversal uses an explicit stack of frames rather than native recursion,
//! so arbitrarily deep link chains cannot exhaust the call stack. The order in
//! which pages are fetched is the same as the recursive formulation.

use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::fingerprint::Fingerprint;
use crate::crawler::parser::PageExtractor;
use crate::output::{ContentSink, CrawlStatistics, OutputError};
use crate::state::VisitedState;
use crate::url::DomainFilter;
use crate::HarvestError;
use chrono::Utc;
use std::time::Duration;

/// Pages between progress log lines
const PROGRESS_INTERVAL: u64 = 25;

/// A page whose outbound links are being processed
struct Frame {
    url: String,
    links: std::vec::IntoIter<String>,
}

/// Owns the visited sets and drives fetch, extract, dedup and persist
pub struct CrawlEngine<F, E, S> {
    fetcher: F,
    extractor: E,
    sink: S,
    filter: DomainFilter,
    delay: Duration,
    state: VisitedState,
    stats: CrawlStatistics,
}

impl<F, E, S> CrawlEngine<F, E, S>
where
    F: PageFetcher,
    E: PageExtractor,
    S: ContentSink,
{
    /// Creates an engine with the default allow-list and no delay
    pub fn new(fetcher: F, extractor: E, sink: S) -> Self {
        Self {
            fetcher,
            extractor,
            sink,
            filter: DomainFilter::default(),
            delay: Duration::ZERO,
            state: VisitedState::new(),
            stats: CrawlStatistics::default(),
        }
    }

    /// Replaces the link filter
    pub fn with_filter(mut self, filter: DomainFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the pause taken after each eligible link, at every depth
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Runs a complete harvest from `seed`
    ///
    /// Fetch failures are logged and skipped; only a sink failure ends the
    /// run early.
    pub async fn run(&mut self, seed: &str) -> Result<(), HarvestError> {
        tracing::info!(
            "Starting harvest at {} (delay {}s, {} allowed prefixes)",
            seed,
            self.delay.as_secs(),
            self.filter.prefixes().len()
        );
        self.stats.started_at = Some(Utc::now());

        let result = self.visit(seed).await;
        let flushed = self.sink.flush();

        self.stats.finished_at = Some(Utc::now());
        self.stats.log_summary();

        result?;
        flushed?;
        Ok(())
    }

    /// Visits a URL and everything reachable from it through eligible links
    ///
    /// A URL that was already visited is a no-op, which also makes repeated
    /// calls with the same URL idempotent.
    pub async fn visit(&mut self, url: &str) -> Result<(), HarvestError> {
        let mut stack: Vec<Frame> = Vec::new();
        if let Some(frame) = self.open_frame(url).await {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(link) = frame.links.next() else {
                if let Some(done) = stack.pop() {
                    tracing::trace!("Finished links of {}", done.url);
                }
                continue;
            };

            if !self.filter.allows(&link) {
                tracing::trace!("Skipping {} (outside allow-list)", link);
                self.stats.links_filtered += 1;
                continue;
            }

            self.harvest_content(&link).await?;
            self.throttle().await;

            if let Some(frame) = self.open_frame(&link).await {
                stack.push(frame);
            }
        }

        Ok(())
    }

    /// Marks a URL visited, fetches it and returns its links as a new frame
    ///
    /// Returns `None` when the URL was already visited or the fetch failed.
    async fn open_frame(&mut self, url: &str) -> Option<Frame> {
        if !self.state.mark_url(url) {
            tracing::trace!("Already visited {}", url);
            return None;
        }

        self.stats.pages_visited += 1;
        if self.stats.pages_visited % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                "Progress: {} pages visited, {} blocks written",
                self.stats.pages_visited,
                self.stats.blocks_written
            );
        }

        tracing::debug!("Visiting {}", url);
        match self.fetcher.fetch_page(url).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                let links = self.extractor.extract_links(&body, &final_url);
                tracing::debug!("Found {} links on {}", links.len(), url);
                self.stats.links_found += links.len() as u64;
                Some(Frame {
                    url: url.to_string(),
                    links: links.into_iter(),
                })
            }
            failure => {
                self.stats.discovery_failures += 1;
                tracing::warn!(
                    "Error fetching {}: {}",
                    url,
                    failure.failure_reason().unwrap_or_default()
                );
                None
            }
        }
    }

    /// Fetches a link target and appends its novel text blocks to the sink
    async fn harvest_content(&mut self, url: &str) -> Result<(), OutputError> {
        self.stats.content_fetches += 1;

        let body = match self.fetcher.fetch_page(url).await {
            FetchResult::Success { body, .. } => body,
            failure => {
                self.stats.content_failures += 1;
                tracing::warn!(
                    "Error fetching content of {}: {}",
                    url,
                    failure.failure_reason().unwrap_or_default()
                );
                return Ok(());
            }
        };

        let mut written = 0;
        for block in self.extractor.extract_content_blocks(&body) {
            self.stats.blocks_extracted += 1;

            if !self.state.record_content(Fingerprint::of(&block)) {
                self.stats.duplicate_blocks += 1;
                continue;
            }

            self.sink.append_line(&block)?;
            self.stats.blocks_written += 1;
            written += 1;
        }

        tracing::debug!("Wrote {} new blocks from {}", written, url);
        Ok(())
    }

    async fn throttle(&mut self) {
        if self.delay.is_zero() {
            return;
        }
        self.stats.throttle_pauses += 1;
        tokio::time::sleep(self.delay).await;
    }

    /// The pause taken after each eligible link
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Visited URL and content sets
    pub fn state(&self) -> &VisitedState {
        &self.state
    }

    /// Counters for the work done so far
    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// The page fetcher used for discovery and content fetches
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The sink receiving harvested blocks
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the engine, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }
}
