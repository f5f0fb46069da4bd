//! Scaffold filenames

use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug regex is valid"));

/// Lower-cases a title and collapses every run of other characters to `-`
///
/// Leading and trailing dashes are removed, so slugging a slug is a no-op.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Filename of the scaffold at zero-based `index`
pub fn tutorial_filename(title: &str, index: usize) -> String {
    format!("tutorial-{}-{}.md", index + 1, slugify(title))
}
