//! Content fingerprints used for text-block deduplication
//!
//! A fingerprint is the XXH3-128 digest of a block's UTF-8 bytes, rendered
//! as 32 lowercase hex characters. It is an equality key only and carries no
//! integrity or security guarantees.

use std::fmt;
use xxhash_rust::xxh3::xxh3_128;

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_LEN: usize = 32;

/// Fixed-length digest of a text block
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint of a text block
    ///
    /// # Examples
    ///
    /// ```
    /// use docs_harvest::crawler::Fingerprint;
    ///
    /// let a = Fingerprint::of("Built-in Functions");
    /// let b = Fingerprint::of("Built-in Functions");
    /// assert_eq!(a, b);
    /// assert_eq!(a.as_str().len(), 32);
    /// ```
    pub fn of(text: &str) -> Self {
        Self::of_bytes(text.as_bytes())
    }

    /// Computes the fingerprint of an arbitrary byte sequence
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(xxh3_128(bytes).to_be_bytes()))
    }

    /// The hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
