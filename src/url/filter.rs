/// Decides which discovered links the crawl may recurse into
///
/// A URL is eligible when it contains any allow-listed prefix as a
/// substring. This is looser than a host or prefix match: an allow-listed
/// string embedded anywhere in the URL, for example inside a query
/// parameter, is enough to pass.
///
/// # Examples
///
/// ```
/// use docs_harvest::url::DomainFilter;
///
/// let filter = DomainFilter::default();
/// assert!(filter.allows("https://docs.python.org/3/"));
/// assert!(!filter.allows("https://example.com/"));
///
/// // Substring match: the allow-listed string sits in the query
/// assert!(filter.allows("https://example.com/?ref=https://python.org/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainFilter {
    prefixes: Vec<String>,
}

impl DomainFilter {
    /// Creates a filter from an allow-list of URL prefixes
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the URL contains at least one allow-listed prefix
    pub fn allows(&self, url: &str) -> bool {
        self.matching_prefix(url).is_some()
    }

    /// Returns the first allow-listed prefix found in the URL
    pub fn matching_prefix(&self, url: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|prefix| url.contains(prefix.as_str()))
            .map(String::as_str)
    }

    /// The configured allow-list
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for DomainFilter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ALLOWED_PREFIXES)
    }
}
