use url::Url;

/// File extensions that never hold documentation text
const EXCLUDED_EXTENSIONS: &[&str] = &["pdf", "zip", "jpg", "png", "gif", "css", "js"];

/// Path segments that lead to application surfaces rather than docs
const EXCLUDED_SEGMENTS: &[&str] = &["api", "login", "signup", "auth", "admin"];

/// Checks whether a URL must never be crawled
///
/// A URL is excluded when any of the following holds:
/// - it contains a fragment marker (`#`)
/// - its path ends in a binary, media, style, or script extension
/// - one of its path segments is `api`, `login`, `signup`, `auth`, or `admin`
///
/// Extension and segment comparisons are case-insensitive.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use tutorial_forge::url::is_excluded;
///
/// assert!(is_excluded(&Url::parse("https://example.com/logo.PNG").unwrap()));
/// assert!(is_excluded(&Url::parse("https://example.com/admin/users").unwrap()));
/// assert!(!is_excluded(&Url::parse("https://example.com/guide/intro").unwrap()));
/// ```
pub fn is_excluded(url: &Url) -> bool {
    if url.fragment().is_some() || url.as_str().contains('#') {
        return true;
    }

    let path = url.path().to_ascii_lowercase();

    if let Some((_, extension)) = path.rsplit_once('.') {
        if !extension.contains('/') && EXCLUDED_EXTENSIONS.contains(&extension) {
            return true;
        }
    }

    path.split('/')
        .any(|segment| EXCLUDED_SEGMENTS.contains(&segment))
}
