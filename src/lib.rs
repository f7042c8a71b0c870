//! docs-harvest: a domain-scoped documentation harvester
//!
//! This crate crawls pages reachable from a seed URL, restricted to an
//! allow-list of URL prefixes, and appends every distinct block of main page
//! text to a flat output file.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for docs-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("start-url value not found in configuration")]
    MissingStartUrl,

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for docs-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CrawlEngine, Fingerprint};
pub use crate::state::VisitedState;
pub use crate::url::DomainFilter;
