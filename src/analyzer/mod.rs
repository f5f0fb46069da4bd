//! Analysis stage: crawled pages in, costed tutorial ideas out
//!
//! Pages are chunked in crawl order, each chunk becomes one prompt, and each
//! reply is parsed independently. A failing batch contributes nothing but
//! never aborts the run.

mod client;
mod cost;
mod prompt;
mod response;
mod types;

pub use client::{AnthropicClient, GenerationError, TextGenerator};
pub use cost::{estimate_cost, estimate_idea_cost};
pub use prompt::build_prompt;
pub use response::{parse_response, ResponseError};
pub use types::{Difficulty, TutorialIdea, TutorialSection};

use crate::config::AnalyzerConfig;
use crate::crawler::CrawledPage;
use std::sync::Arc;
use std::time::Duration;

/// Position of a batch within one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Zero-based batch index
    pub index: usize,
    pub total_batches: usize,
    /// Pages contained in all earlier batches
    pub pages_before: usize,
    pub total_pages: usize,
}

/// Drives the text service over batches of pages
#[derive(Clone)]
pub struct Analyzer {
    generator: Arc<dyn TextGenerator>,
    batch_size: usize,
    batch_delay: Duration,
    preview_chars: usize,
}

impl Analyzer {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &AnalyzerConfig) -> Self {
        Self {
            generator,
            batch_size: config.batch_size.max(1),
            batch_delay: Duration::from_millis(config.batch_delay_ms),
            preview_chars: config.preview_chars,
        }
    }

    /// Number of batches `page_count` pages split into
    pub fn batch_count(&self, page_count: usize) -> usize {
        page_count.div_ceil(self.batch_size)
    }

    /// Analyzes all pages and concatenates the ideas in batch order
    pub async fn analyze(&self, pages: &[CrawledPage]) -> Vec<TutorialIdea> {
        self.analyze_with_progress(pages, |_| {}).await
    }

    /// Like [`Analyzer::analyze`], calling `on_batch` before each batch starts
    pub async fn analyze_with_progress<F>(
        &self,
        pages: &[CrawledPage],
        mut on_batch: F,
    ) -> Vec<TutorialIdea>
    where
        F: FnMut(BatchProgress),
    {
        let total_batches = self.batch_count(pages.len());
        let mut ideas = Vec::new();

        tracing::info!(
            "Analyzing {} pages in {} batches of up to {}",
            pages.len(),
            total_batches,
            self.batch_size
        );

        for (index, batch) in pages.chunks(self.batch_size).enumerate() {
            if index > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }

            on_batch(BatchProgress {
                index,
                total_batches,
                pages_before: index * self.batch_size,
                total_pages: pages.len(),
            });

            let batch_ideas = self.analyze_batch(index, batch).await;
            tracing::debug!(
                "Batch {}/{} produced {} ideas",
                index + 1,
                total_batches,
                batch_ideas.len()
            );
            ideas.extend(batch_ideas);
        }

        tracing::info!("Analysis completed: {} ideas", ideas.len());
        ideas
    }

    async fn analyze_batch(&self, index: usize, batch: &[CrawledPage]) -> Vec<TutorialIdea> {
        let prompt = build_prompt(batch, self.preview_chars);

        let reply = match self.generator.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Batch {} failed: {}", index + 1, e);
                return Vec::new();
            }
        };

        match parse_response(&reply) {
            Ok(ideas) => ideas,
            Err(e) => {
                tracing::warn!("Batch {} reply unusable: {}", index + 1, e);
                Vec::new()
            }
        }
    }
}
