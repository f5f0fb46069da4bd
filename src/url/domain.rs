use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use tutorial_forge::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://docs.example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("docs.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
