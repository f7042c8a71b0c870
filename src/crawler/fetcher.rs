//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the HTTP client with the configured user agent
//! - GET requests for discovery and content fetches
//! - Error classification into non-fatal fetch results
//!
//! Fetches are never retried; a failed URL is reported once and skipped.

use crate::config::Config;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// User agent sent when the configuration does not set one
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },

    /// The URL could not be turned into a request
    InvalidUrl {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true if the page body is available
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Human-readable reason for a failed fetch
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP status {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
            Self::InvalidUrl { error } => Some(format!("invalid URL: {}", error)),
        }
    }
}

/// Fetch gateway consumed by the crawl engine
pub trait PageFetcher {
    /// Fetches a URL; every failure is reported through the returned value
    fn fetch_page(&self, url: &str) -> impl Future<Output = FetchResult>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - User agent override, `DEFAULT_USER_AGENT` when `None`
///
/// # Example
///
/// ```no_run
/// use docs_harvest::crawler::build_http_client;
///
/// let client = build_http_client(Some("MyHarvester/1.0")).unwrap();
/// ```
pub fn build_http_client(user_agent: Option<&str>) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher using the configured user agent
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config.user_agent.as_deref())?))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL with a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with readable body | `Success` |
/// | Any other status | `HttpError` |
/// | Timeout, connect failure, body read failure | `NetworkError` |
/// | Relative or malformed URL | `InvalidUrl` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_builder() {
                FetchResult::InvalidUrl {
                    error: e.to_string(),
                }
            } else if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: format!("Connection failed: {}", e),
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}
