//! URL handling module for docs-harvest
//!
//! This module decides which discovered links are eligible for crawling.

mod filter;

pub use filter::DomainFilter;
