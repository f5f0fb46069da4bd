use crate::UrlError;
use url::Url;

/// Normalizes a URL into the string key used for crawl dedup
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or relative
/// 2. Accept only HTTP and HTTPS schemes
/// 3. Require a host (lowercased by the parser)
/// 4. Serialize and strip a single trailing slash
///
/// Query strings and fragments are kept as-is; fragment URLs are rejected
/// later by the link filter rather than rewritten here.
///
/// # Examples
///
/// ```
/// use tutorial_forge::url::normalize_url;
///
/// let url = normalize_url("https://Docs.Example.com/guide/").unwrap();
/// assert_eq!(url, "https://docs.example.com/guide");
/// ```
pub fn normalize_url(url_str: &str) -> Result<String, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(&url)
}

/// Normalizes an already-parsed URL
pub fn normalize_parsed(url: &Url) -> Result<String, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingDomain),
    }

    let serialized = url.as_str();
    Ok(serialized
        .strip_suffix('/')
        .unwrap_or(serialized)
        .to_string())
}
