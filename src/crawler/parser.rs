//! HTML parser for extracting links and main-content text blocks
//!
//! This module handles parsing fetched pages to extract:
//! - Links to consider for recursion (from `<a href>` tags)
//! - The page's main textual content, split into blocks

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text forms one content block
const BLOCK_ELEMENTS: [&str; 14] = [
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "pre",
    "blockquote",
    "dt",
    "dd",
    "figcaption",
    "td",
];

/// Page chrome that never counts as main content
const BOILERPLATE_ELEMENTS: [&str; 7] = [
    "nav", "header", "footer", "aside", "script", "style", "noscript",
];

/// Link and content extraction consumed by the crawl engine
pub trait PageExtractor {
    /// Returns hyperlink URLs in document order
    ///
    /// `page_url` is the URL the HTML was served from. The result may
    /// contain duplicates.
    fn extract_links(&self, html: &str, page_url: &str) -> Vec<String>;

    /// Returns the page's main text blocks in document order
    fn extract_content_blocks(&self, html: &str) -> Vec<String>;
}

/// `PageExtractor` built on the scraper crate
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlExtractor;

impl HtmlExtractor {
    /// Creates an extractor with the built-in block and chrome element sets
    pub fn new() -> Self {
        Self
    }
}

impl PageExtractor for HtmlExtractor {
    fn extract_links(&self, html: &str, page_url: &str) -> Vec<String> {
        let base_url = Url::parse(page_url).ok();
        extract_links(html, base_url.as_ref())
    }

    fn extract_content_blocks(&self, html: &str) -> Vec<String> {
        extract_content_blocks(html)
    }
}

/// Extracts all followable links from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
///
/// Relative links are resolved against `base_url`; without a base only
/// absolute links survive. The `#fragment` is removed, so anchors into the
/// same document yield the same URL.
///
/// # Example
///
/// ```
/// use docs_harvest::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/3/tutorial/">Tutorial</a></body></html>"#;
/// let base_url = Url::parse("https://docs.python.org/3/").unwrap();
/// let links = extract_links(html, Some(&base_url));
/// assert_eq!(links, vec!["https://docs.python.org/3/tutorial/".to_string()]);
/// ```
pub fn extract_links(html: &str, base_url: Option<&Url>) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// The returned URL never carries a fragment.
fn resolve_link(href: &str, base_url: Option<&Url>) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let resolved = match base_url {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    match resolved {
        Ok(mut absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            absolute_url.set_fragment(None);
            Some(absolute_url.to_string())
        }
        _ => None,
    }
}

/// Extracts the main-content text blocks of an HTML document
///
/// The content root is the first `<main>`, else the first `<article>`, else
/// `<body>`. Inside it, every outermost block element that is not part of
/// page chrome yields one block. Only elements below the root count, so a
/// root placed inside a layout cell or a header still yields its content. Whitespace runs, line breaks included, are
/// collapsed to a single space so a block always fits on one output line.
///
/// # Example
///
/// ```
/// use docs_harvest::crawler::extract_content_blocks;
///
/// let html = r#"<html><body>
///     <nav><p>Menu</p></nav>
///     <main><h1>Tutorial</h1><p>Python is an easy
///         to learn language.</p></main>
/// </body></html>"#;
/// assert_eq!(
///     extract_content_blocks(html),
///     vec!["Tutorial", "Python is an easy to learn language."]
/// );
/// ```
pub fn extract_content_blocks(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Some(root) = find_content_root(&document) else {
        return Vec::new();
    };

    let block_list = BLOCK_ELEMENTS.join(", ");
    let Ok(block_selector) = Selector::parse(&block_list) else {
        return Vec::new();
    };

    root.select(&block_selector)
        .filter(|element| !is_nested_or_boilerplate(element, &root))
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect()
}

fn find_content_root(document: &Html) -> Option<ElementRef<'_>> {
    ["main", "article", "body"].iter().find_map(|name| {
        Selector::parse(name)
            .ok()
            .and_then(|selector| document.select(&selector).next())
    })
}

/// True when an ancestor between `element` and `root` is page chrome or
/// another content block
fn is_nested_or_boilerplate(element: &ElementRef<'_>, root: &ElementRef<'_>) -> bool {
    let root_id = root.id();
    element
        .ancestors()
        .take_while(|ancestor| ancestor.id() != root_id)
        .any(|ancestor| {
            ancestor.value().as_element().is_some_and(|parent| {
                let name = parent.name();
                BLOCK_ELEMENTS.contains(&name) || BOILERPLATE_ELEMENTS.contains(&name)
            })
        })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
