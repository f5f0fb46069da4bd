//! Breadth-first crawl loop
//!
//! This module contains the traversal that turns a seed URL into an ordered
//! sequence of `CrawledPage` records:
//! - Dequeuing URLs from the crawl state in FIFO order
//! - Fetching and parsing each page once
//! - Filtering and enqueuing discovered links
//! - Pausing between fetches

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{describe_status, fetch_url, FetchResult};
use crate::crawler::parser::parse_html;
use crate::crawler::state::CrawlState;
use crate::url::{extract_domain, is_excluded, is_within_scope, normalize_parsed, normalize_url};
use crate::UrlError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use url::Url;

/// A fetched documentation page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawledPage {
    /// Normalized URL (trailing slash stripped)
    pub url: String,

    /// First heading, document title, or "Untitled"
    pub title: String,

    /// Whitespace-collapsed main text, length-capped
    pub content: String,

    /// h1-h3 texts in document order
    pub headings: Vec<String>,
}

/// Crawls one documentation site within a page budget
pub struct Crawler {
    client: Client,
    seed: String,
    seed_host: String,
    page_budget: usize,
    request_delay: Duration,
    content_max_chars: usize,
}

impl Crawler {
    /// Creates a crawler for the given seed URL
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for every fetch
    /// * `seed_url` - The starting page
    /// * `page_budget` - Maximum number of pages to collect
    /// * `config` - Crawler configuration (delay, content ceiling)
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(UrlError)` - The seed URL is malformed
    pub fn new(
        client: Client,
        seed_url: &str,
        page_budget: usize,
        config: &CrawlerConfig,
    ) -> Result<Self, UrlError> {
        let seed = normalize_url(seed_url)?;
        let parsed = Url::parse(&seed).map_err(|e| UrlError::Parse(e.to_string()))?;
        let seed_host = extract_domain(&parsed).ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            client,
            seed,
            seed_host,
            page_budget,
            request_delay: Duration::from_millis(config.request_delay_ms),
            content_max_chars: config.content_max_chars,
        })
    }

    /// Returns the normalized seed URL
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Returns the page budget
    pub fn page_budget(&self) -> usize {
        self.page_budget
    }

    /// Runs the crawl to completion
    ///
    /// Per-page failures are logged and skipped; they never abort the crawl.
    /// The result is empty when the seed itself could not be fetched.
    ///
    /// # Returns
    ///
    /// Pages in fetch order, at most `page_budget` of them, each URL once
    pub async fn crawl(&self) -> Vec<CrawledPage> {
        tracing::info!(
            "Starting crawl of {} (budget: {} pages)",
            self.seed,
            self.page_budget
        );

        let start_time = Instant::now();
        let mut state = CrawlState::new(self.seed.clone(), self.page_budget);
        let mut pages = Vec::new();
        let mut fetched_any = false;

        while let Some(url) = state.next_url() {
            if fetched_any && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
            fetched_any = true;

            let Some((page, links)) = self.visit(&url).await else {
                continue;
            };

            state.record_page();
            pages.push(page);

            let enqueued = self.enqueue_links(&mut state, links);
            tracing::debug!(
                "Collected {} ({}/{}), {} new links, {} queued",
                url,
                state.collected(),
                self.page_budget,
                enqueued,
                state.queue_len()
            );
        }

        tracing::info!(
            "Crawl completed: {} pages collected, {} URLs visited in {:?}",
            pages.len(),
            state.visited_count(),
            start_time.elapsed()
        );

        pages
    }

    /// Fetches and parses one page
    ///
    /// Returns the page and its raw outbound links, or None if the page
    /// should be skipped.
    async fn visit(&self, url: &str) -> Option<(CrawledPage, Vec<String>)> {
        let (final_url, body) = match fetch_url(&self.client, url).await {
            FetchResult::Success { final_url, body } => (final_url, body),
            FetchResult::HttpError { status_code } => {
                tracing::debug!("Skipping {}: {}", url, describe_status(status_code));
                return None;
            }
            FetchResult::ContentMismatch { content_type } => {
                tracing::debug!("Skipping {}: not a document ({})", url, content_type);
                return None;
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Skipping {}: {}", url, error);
                return None;
            }
        };

        // Relative links resolve against where the server actually served the page
        let base = match Url::parse(&final_url).or_else(|_| Url::parse(url)) {
            Ok(base) => base,
            Err(e) => {
                tracing::warn!("Skipping {}: unparseable URL ({})", url, e);
                return None;
            }
        };

        let parsed = parse_html(&body, &base, self.content_max_chars);

        let page = CrawledPage {
            url: url.to_string(),
            title: parsed.title,
            content: parsed.content,
            headings: parsed.headings,
        };

        Some((page, parsed.links))
    }

    /// Filters discovered links and adds the survivors to the queue
    ///
    /// # Link Filter
    ///
    /// A link is enqueued only if all of the following hold:
    /// - it normalizes to an HTTP(S) URL with a host
    /// - it has not been seen earlier in this same extraction pass
    /// - it has not been visited
    /// - its host equals or is a sub-domain of the seed host
    /// - it is not excluded (fragments, media/script extensions, app paths)
    fn enqueue_links(&self, state: &mut CrawlState, links: Vec<String>) -> usize {
        let mut seen_in_pass = HashSet::new();
        let mut enqueued = 0;

        for link in links {
            let Ok(parsed) = Url::parse(&link) else {
                continue;
            };

            let normalized = match normalize_parsed(&parsed) {
                Ok(n) => n,
                Err(e) => {
                    tracing::trace!("Failed to normalize URL {}: {}", link, e);
                    continue;
                }
            };

            if !seen_in_pass.insert(normalized.clone()) || state.is_visited(&normalized) {
                continue;
            }

            let in_scope = extract_domain(&parsed)
                .map(|host| is_within_scope(&self.seed_host, &host))
                .unwrap_or(false);
            if !in_scope {
                tracing::trace!("Out of scope: {}", normalized);
                continue;
            }

            if is_excluded(&parsed) {
                tracing::trace!("Excluded: {}", normalized);
                continue;
            }

            if state.enqueue(normalized) {
                enqueued += 1;
            }
        }

        enqueued
    }
}
