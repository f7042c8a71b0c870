//! Configuration module for docs-harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use docs_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Harvesting into: {}", config.file_name);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DEFAULT_ALLOWED_PREFIXES};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
