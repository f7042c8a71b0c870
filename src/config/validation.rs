use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_start_url(&config.start_url)?;
    validate_file_name(&config.file_name)?;
    validate_allowed_prefixes(&config.allowed_prefixes)?;
    Ok(())
}

/// The seed must be present and an absolute http(s) URL
fn validate_start_url(start_url: &str) -> Result<(), ConfigError> {
    let start_url = start_url.trim();
    if start_url.is_empty() {
        return Err(ConfigError::MissingStartUrl);
    }

    let url = Url::parse(start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start-url '{}': {}", start_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "start-url '{}' must use http or https",
            start_url
        )));
    }

    Ok(())
}

fn validate_file_name(file_name: &str) -> Result<(), ConfigError> {
    if file_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "file-name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// An empty prefix would be a substring of every URL
fn validate_allowed_prefixes(prefixes: &[String]) -> Result<(), ConfigError> {
    if prefixes.iter().any(|prefix| prefix.is_empty()) {
        return Err(ConfigError::Validation(
            "allowed-prefixes cannot contain an empty entry".to_string(),
        ));
    }
    Ok(())
}
