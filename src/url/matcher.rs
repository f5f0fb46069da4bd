/// Checks whether a candidate host lies within the crawl scope of the seed host
///
/// A candidate is in scope when it equals the seed host or is one of its
/// sub-domains. Hosts are expected to be lowercase already.
///
/// # Examples
///
/// ```
/// use tutorial_forge::url::is_within_scope;
///
/// assert!(is_within_scope("example.com", "example.com"));
/// assert!(is_within_scope("example.com", "docs.example.com"));
/// assert!(!is_within_scope("example.com", "notexample.com"));
/// assert!(!is_within_scope("docs.example.com", "example.com"));
/// ```
pub fn is_within_scope(seed_host: &str, candidate: &str) -> bool {
    if seed_host.is_empty() || candidate.is_empty() {
        return false;
    }

    candidate == seed_host
        || candidate
            .strip_suffix(seed_host)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
