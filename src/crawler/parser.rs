//! HTML parser for extracting page text, headings, and links
//!
//! One parse of the fetched document serves both purposes:
//! - Content extraction reads only the main documentation containers, with
//!   navigation, script, and style subtrees ignored
//! - Link extraction reads the whole document, navigation included, since
//!   sidebars and nav bars are where documentation sites keep their links

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Title used when a page has neither an `<h1>` nor a `<title>`
pub const UNTITLED: &str = "Untitled";

/// Elements whose subtrees never contribute text or headings
const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "header", "footer"];

/// Containers that usually hold the documentation body
const CONTENT_SELECTOR: &str = "main, article, .content, .documentation";

/// Elements after which a word boundary is inserted when flattening text
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "li", "ul", "ol", "dl", "dt", "dd", "h1", "h2", "h3", "h4", "h5",
    "h6", "pre", "blockquote", "table", "tr", "td", "th", "br", "hr", "main", "article",
    "aside", "figure", "figcaption",
];

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// First `<h1>`, else `<title>`, else [`UNTITLED`]
    pub title: String,

    /// Whitespace-collapsed main text, truncated to the configured ceiling
    pub content: String,

    /// Texts of h1-h3 elements in document order
    pub headings: Vec<String>,

    /// All followable links found on the page (absolute URLs)
    pub links: Vec<String>,
}

/// Parses HTML content and extracts text, headings, and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Anything that does not resolve to HTTP(S)
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
/// * `content_max_chars` - Ceiling on the extracted text length
///
/// # Example
///
/// ```
/// use tutorial_forge::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Docs</title></head>
///     <body><main><h1>Intro</h1><p>Hello</p><a href="/next">Next</a></main></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url, 10_000);
/// assert_eq!(parsed.title, "Intro");
/// assert_eq!(parsed.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, content_max_chars: usize) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        content: extract_content(&document, content_max_chars),
        headings: extract_headings(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title: first visible `<h1>`, then `<title>`, then a sentinel
fn extract_title(document: &Html) -> String {
    first_text(document, "h1", true)
        .or_else(|| first_text(document, "title", false))
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Returns the collapsed text of the first non-empty element matching `selector`
fn first_text(document: &Html, selector: &str, skip_stripped: bool) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .filter(|element| !(skip_stripped && is_stripped(*element)))
        .map(element_text)
        .find(|text| !text.is_empty())
}

/// Extracts the main documentation text
///
/// Text comes from the content containers; when none of them yield any text
/// the whole `<body>` is used instead. Nested containers are read once.
fn extract_content(document: &Html, max_chars: usize) -> String {
    let mut raw = String::new();

    if let Ok(selector) = Selector::parse(CONTENT_SELECTOR) {
        for element in document.select(&selector) {
            if is_stripped(element) || has_matching_ancestor(element, &selector) {
                continue;
            }
            collect_text(element, &mut raw);
            raw.push(' ');
        }
    }

    let mut content = collapse_whitespace(&raw);

    if content.is_empty() {
        if let Ok(body_selector) = Selector::parse("body") {
            let mut body_raw = String::new();
            for body in document.select(&body_selector) {
                collect_text(body, &mut body_raw);
            }
            content = collapse_whitespace(&body_raw);
        }
    }

    truncate_chars(&content, max_chars)
}

/// Extracts h1-h3 texts in document order, skipping empty and stripped ones
fn extract_headings(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("h1, h2, h3") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|element| !is_stripped(*element))
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
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
/// - fragment-only hrefs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
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

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url.to_string())
    } else {
        None
    }
}

/// True when the element or any ancestor is a stripped tag
fn is_stripped(element: ElementRef<'_>) -> bool {
    STRIPPED_TAGS.contains(&element.value().name())
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| STRIPPED_TAGS.contains(&ancestor.value().name()))
}

fn has_matching_ancestor(element: ElementRef<'_>, selector: &Selector) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| selector.matches(&ancestor))
}

/// Collapsed visible text of one element
fn element_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    collapse_whitespace(&raw)
}

/// Appends the text below `element`, skipping stripped subtrees
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                if STRIPPED_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                    if BLOCK_TAGS.contains(&el.name()) {
                        out.push(' ');
                    }
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates on a character boundary
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
