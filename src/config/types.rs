use crate::url::DomainFilter;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// URL prefixes eligible for recursion when the config does not name any
pub const DEFAULT_ALLOWED_PREFIXES: [&str; 3] = [
    "https://pythoninsider.blogspot.com/",
    "https://docs.python.org/",
    "https://python.org/",
];

/// Main configuration structure for docs-harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seed URL the crawl starts from
    #[serde(rename = "start-url", default)]
    pub start_url: String,

    /// Output file that harvested text blocks are appended to
    #[serde(rename = "file-name", default)]
    pub file_name: String,

    /// Fixed pause after each eligible link, in seconds
    #[serde(
        rename = "sleep-time",
        default,
        deserialize_with = "deserialize_lenient_seconds"
    )]
    pub sleep_time: u64,

    /// URL substrings a link must contain to be followed
    #[serde(rename = "allowed-prefixes", default = "default_allowed_prefixes")]
    pub allowed_prefixes: Vec<String>,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}

impl Config {
    /// Builds a configuration with default optional values
    pub fn new(start_url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            file_name: file_name.into(),
            sleep_time: 0,
            allowed_prefixes: default_allowed_prefixes(),
            user_agent: None,
        }
    }

    /// The inter-request delay as a duration
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.sleep_time)
    }

    /// The link filter described by `allowed_prefixes`
    pub fn domain_filter(&self) -> DomainFilter {
        DomainFilter::new(self.allowed_prefixes.iter().cloned())
    }
}

fn default_allowed_prefixes() -> Vec<String> {
    DEFAULT_ALLOWED_PREFIXES
        .iter()
        .map(|prefix| prefix.to_string())
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeconds {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(toml::Value),
}

/// Accepts integers, floats and numeric strings; anything else becomes 0
///
/// Fractional values are truncated, whether written as a number or a string.
fn deserialize_lenient_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = match RawSeconds::deserialize(deserializer)? {
        RawSeconds::Integer(value) => u64::try_from(value).ok(),
        RawSeconds::Float(value) => whole_seconds(value),
        RawSeconds::Text(text) => text.trim().parse::<f64>().ok().and_then(whole_seconds),
        RawSeconds::Other(value) => {
            tracing::debug!("sleep-time has unsupported type: {}", value.type_str());
            None
        }
    };

    Ok(seconds.unwrap_or_else(|| {
        tracing::warn!("sleep-time is not a valid number of seconds, using 0");
        0
    }))
}

/// Truncates a non-negative finite number of seconds
fn whole_seconds(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then_some(value as u64)
}
