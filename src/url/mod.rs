//! URL handling module for Tutorial Forge
//!
//! This module provides URL normalization, domain extraction, crawl scope
//! matching, and the exclusion rules for links that are not documentation.

mod domain;
mod filter;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::extract_domain;
pub use filter::is_excluded;
pub use matcher::is_within_scope;
pub use normalize::{normalize_parsed, normalize_url};
