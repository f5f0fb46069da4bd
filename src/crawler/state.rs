//! Crawl frontier and dedup state for one crawl run
//!
//! `CrawlState` is created by a single `Crawler::crawl` call, threaded through
//! its traversal loop by `&mut`, and dropped when the crawl returns. Nothing
//! about it is shared between runs.

use std::collections::{HashSet, VecDeque};

/// Frontier queue, visited set, and page budget for one crawl
#[derive(Debug, Clone)]
pub struct CrawlState {
    /// Normalized URLs already handed out for fetching
    visited: HashSet<String>,

    /// Discovered, not-yet-visited URLs in discovery order
    queue: VecDeque<String>,

    /// Ceiling on successfully collected pages
    page_budget: usize,

    /// Pages successfully collected so far
    collected: usize,
}

impl CrawlState {
    /// Creates a state whose frontier holds only the seed URL
    pub fn new(seed: String, page_budget: usize) -> Self {
        Self {
            visited: HashSet::new(),
            queue: VecDeque::from([seed]),
            page_budget,
            collected: 0,
        }
    }

    /// Gets the next URL to fetch and marks it visited
    ///
    /// URLs come out in FIFO order, so shallower pages are fetched before
    /// deeper ones. Already-visited entries are discarded on the way.
    ///
    /// # Returns
    ///
    /// * `Some(String)` - A URL that has never been handed out before
    /// * `None` - The queue is exhausted or the page budget is reached
    pub fn next_url(&mut self) -> Option<String> {
        while !self.budget_reached() {
            let url = self.queue.pop_front()?;

            if self.visited.insert(url.clone()) {
                return Some(url);
            }

            tracing::trace!("Discarding already visited URL: {}", url);
        }

        None
    }

    /// Adds a URL to the back of the queue unless it was already visited
    ///
    /// Returns true if the URL was enqueued.
    pub fn enqueue(&mut self, url: String) -> bool {
        if self.visited.contains(&url) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    /// Records one successfully collected page against the budget
    pub fn record_page(&mut self) {
        self.collected += 1;
    }

    /// Returns whether a URL has been handed out for fetching
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns whether the page budget has been used up
    pub fn budget_reached(&self) -> bool {
        self.collected >= self.page_budget
    }

    /// Returns the number of URLs waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Returns the number of URLs handed out for fetching
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Returns the number of pages collected so far
    pub fn collected(&self) -> usize {
        self.collected
    }
}
