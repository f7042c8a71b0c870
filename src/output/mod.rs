//! Output module for persisting harvested content
//!
//! This module handles:
//! - Bootstrapping the output file
//! - Appending novel text blocks to it
//! - Recording and reporting run statistics

mod sink;
pub mod stats;
mod traits;

pub use sink::{ensure_output_file, FileSink};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{ContentSink, OutputError, OutputResult};
