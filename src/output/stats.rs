//! Statistics collected during a harvest run
//!
//! This module provides the counters the crawl engine updates as it works,
//! and functions for reporting them once the run is over.

use chrono::{DateTime, Utc};

/// Harvest run statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run finished
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages dispatched for a discovery fetch
    pub pages_visited: u64,

    /// Discovery fetches that failed
    pub discovery_failures: u64,

    /// Links returned by the link extractor
    pub links_found: u64,

    /// Links rejected by the domain filter
    pub links_filtered: u64,

    /// Content fetches attempted
    pub content_fetches: u64,

    /// Content fetches that failed
    pub content_failures: u64,

    /// Text blocks returned by the content extractor
    pub blocks_extracted: u64,

    /// Text blocks appended to the output
    pub blocks_written: u64,

    /// Text blocks skipped because an identical block was already written
    pub duplicate_blocks: u64,

    /// Throttling pauses taken between links
    pub throttle_pauses: u64,
}

impl CrawlStatistics {
    /// Total number of failed fetches
    pub fn total_failures(&self) -> u64 {
        self.discovery_failures + self.content_failures
    }

    /// Run duration in seconds, once the run has finished
    pub fn duration_seconds(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => Some((finished - started).num_seconds()),
            _ => None,
        }
    }

    /// Logs a one-line summary at info level
    pub fn log_summary(&self) {
        tracing::info!(
            "Harvest finished: {} pages visited, {} blocks written, {} duplicates skipped, {} failed fetches",
            self.pages_visited,
            self.blocks_written,
            self.duplicate_blocks,
            self.total_failures()
        );
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Harvest Statistics ===\n");

    if let Some(started) = stats.started_at {
        println!("Started:  {}", started.to_rfc3339());
    }
    if let Some(finished) = stats.finished_at {
        println!("Finished: {}", finished.to_rfc3339());
    }
    if let Some(seconds) = stats.duration_seconds() {
        println!("Duration: {}s", seconds);
    }
    println!();

    println!("Traversal:");
    println!("  Pages visited: {}", stats.pages_visited);
    println!("  Links found: {}", stats.links_found);
    println!("  Links outside allow-list: {}", stats.links_filtered);
    println!("  Content fetches: {}", stats.content_fetches);
    println!();

    println!("Content:");
    println!("  Blocks extracted: {}", stats.blocks_extracted);
    println!("  Blocks written: {}", stats.blocks_written);
    println!("  Duplicates skipped: {}", stats.duplicate_blocks);
    println!();

    if stats.total_failures() > 0 {
        println!("Failures:");
        println!("  Discovery fetches: {}", stats.discovery_failures);
        println!("  Content fetches: {}", stats.content_failures);
        println!();
    }

    let novelty = if stats.blocks_extracted > 0 {
        (stats.blocks_written as f64 / stats.blocks_extracted as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Novel content: {:.1}% ({} / {} blocks)",
        novelty, stats.blocks_written, stats.blocks_extracted
    );
}
