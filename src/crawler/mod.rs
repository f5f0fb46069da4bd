//! Crawler module for documentation page fetching and extraction
//!
//! This module contains the crawl stage of the pipeline, including:
//! - HTTP fetching with failure classification
//! - HTML parsing for text, headings, and links
//! - The per-run frontier and visited set
//! - The breadth-first traversal itself

mod fetcher;
mod parser;
mod runner;
mod state;

pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{parse_html, ParsedPage, UNTITLED};
pub(crate) use parser::truncate_chars;
pub use runner::{CrawledPage, Crawler};
pub use state::CrawlState;

use crate::config::CrawlerConfig;

/// Crawls a documentation site with a fresh HTTP client
///
/// Convenience entry point for one-off crawls. Services that crawl repeatedly
/// should build one client and use [`Crawler::new`] directly.
///
/// # Returns
///
/// * `Ok(Vec<CrawledPage>)` - Collected pages (possibly empty)
/// * `Err(ForgeError)` - The seed URL is malformed or the client could not be built
pub async fn crawl(
    seed_url: &str,
    page_budget: usize,
    config: &CrawlerConfig,
) -> crate::Result<Vec<CrawledPage>> {
    let client = build_http_client(config)?;
    let crawler = Crawler::new(client, seed_url, page_budget, config)?;
    Ok(crawler.crawl().await)
}
