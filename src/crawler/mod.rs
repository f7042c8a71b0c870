//! Crawler module for page fetching and content harvesting
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching without retries
//! - HTML parsing for links and main-content blocks
//! - Content fingerprinting for deduplication
//! - The depth-first crawl engine

mod engine;
mod fetcher;
pub mod fingerprint;
mod parser;

pub use engine::CrawlEngine;
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher, DEFAULT_USER_AGENT};
pub use fingerprint::Fingerprint;
pub use parser::{extract_content_blocks, extract_links, HtmlExtractor, PageExtractor};

use crate::config::Config;
use crate::output::{ensure_output_file, CrawlStatistics, FileSink};
use crate::HarvestError;
use std::path::Path;

/// Runs a complete harvest described by `config`
///
/// This is the main entry point for starting a harvest. It will:
/// 1. Create the output file if it does not exist
/// 2. Build the HTTP client
/// 3. Crawl depth-first from the seed URL, appending novel content
///
/// # Arguments
///
/// * `config` - The validated harvest configuration
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - The frontier was exhausted
/// * `Err(HarvestError)` - Startup failed or the output could not be written
pub async fn harvest(config: &Config) -> Result<CrawlStatistics, HarvestError> {
    ensure_output_file(Path::new(&config.file_name))?;
    let sink = FileSink::open(&config.file_name)?;
    let fetcher = HttpFetcher::from_config(config)?;

    let mut engine = CrawlEngine::new(fetcher, HtmlExtractor::new(), sink)
        .with_filter(config.domain_filter())
        .with_delay(config.delay());

    engine.run(&config.start_url).await?;

    Ok(engine.statistics().clone())
}
