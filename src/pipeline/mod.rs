//! Pipeline coordinator: crawl, analyze, render
//!
//! This module sequences the stages of one generation run:
//! - Validating the request before any network activity
//! - Crawling the documentation site
//! - Analyzing the pages in batches
//! - Rendering scaffolds and the CSV index
//!
//! Every run reports its progress through a [`ProgressSink`]. The buffered
//! mode logs the events and returns the result; the streaming mode forwards
//! each event to the caller. Both share [`Pipeline::run`].

mod error;
mod progress;
mod request;
mod result;
mod sink;

pub use error::{ErrorBody, PipelineError, UNEXPECTED_FAILURE};
pub use progress::{
    analysis_progress, estimate_eta, format_eta, EventKind, ProgressEvent, ProgressTracker,
    Reporter, Stage,
};
pub use request::{GenerateRequest, ValidatedRequest};
pub use result::{build_result, GeneratedFile, GenerationResult, GenerationStats};
pub use sink::{ChannelSink, LogSink, ProgressSink};

use crate::analyzer::{Analyzer, AnthropicClient, TextGenerator};
use crate::config::Config;
use crate::crawler::{build_http_client, Crawler};
use crate::ForgeError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Shared, read-only state for generation runs
///
/// Cloning is cheap; every clone shares the HTTP client, the text generator
/// and the configuration.
#[derive(Clone)]
pub struct Pipeline {
    config: Arc<Config>,
    client: Client,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Pipeline {
    /// Creates a pipeline that talks to the Anthropic API
    ///
    /// Without an API key the pipeline still constructs, but every run fails
    /// validation with [`PipelineError::MissingCredential`].
    pub fn new(config: Config, api_key: Option<String>) -> Result<Self, ForgeError> {
        let generator = match api_key {
            Some(key) => {
                let client = AnthropicClient::new(key, &config.analyzer)?;
                Some(Arc::new(client) as Arc<dyn TextGenerator>)
            }
            None => None,
        };
        Self::with_generator(config, generator)
    }

    /// Creates a pipeline around any text generator
    pub fn with_generator(
        config: Config,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Result<Self, ForgeError> {
        let client = build_http_client(&config.crawler)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            generator,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true when runs can reach the text service
    pub fn has_credential(&self) -> bool {
        self.generator.is_some()
    }

    /// Runs one generation to its terminal state
    ///
    /// Exactly one terminal event (`complete` or `error`) is emitted to `sink`,
    /// including for validation failures. The work runs on its own task under
    /// the configured wall-clock ceiling; a panic or timeout becomes an error.
    ///
    /// # Returns
    ///
    /// * `Ok(GenerationResult)` - At least one tutorial was generated
    /// * `Err(PipelineError)` - Validation failed, a stage came up empty, or
    ///   the run failed unexpectedly
    pub async fn run(
        &self,
        request: GenerateRequest,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<GenerationResult, PipelineError> {
        let reporter = Arc::new(Reporter::new(sink));

        let outcome = match self.validate(&request) {
            Ok((validated, generator)) => self.drive(validated, generator, reporter.clone()).await,
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(result) => {
                tracing::info!(
                    "Generation completed: {} tutorials from {} pages",
                    result.stats.tutorials_generated,
                    result.stats.pages_crawled
                );
                reporter.complete(result);
            }
            Err(e) => {
                if e.is_unexpected() {
                    tracing::error!("Generation failed: {}", e);
                } else {
                    tracing::warn!("Generation failed: {}", e);
                }
                reporter.fail(e.to_string());
            }
        }

        outcome
    }

    fn validate(
        &self,
        request: &GenerateRequest,
    ) -> Result<(ValidatedRequest, Arc<dyn TextGenerator>), PipelineError> {
        let validated = request.validate(&self.config.crawler, self.has_credential())?;
        let generator = self
            .generator
            .clone()
            .ok_or(PipelineError::MissingCredential)?;
        Ok((validated, generator))
    }

    /// Spawns the stages and enforces the wall-clock ceiling
    async fn drive(
        &self,
        request: ValidatedRequest,
        generator: Arc<dyn TextGenerator>,
        reporter: Arc<Reporter>,
    ) -> Result<GenerationResult, PipelineError> {
        let limit = Duration::from_secs(self.config.server.max_duration_secs);
        let pipeline = self.clone();

        let handle =
            tokio::spawn(async move { pipeline.execute(request, generator, &reporter).await });
        let abort = handle.abort_handle();

        match tokio::time::timeout(limit, handle).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_error)) => Err(PipelineError::Internal(format!(
                "Pipeline task failed: {}",
                join_error
            ))),
            Err(_) => {
                abort.abort();
                Err(PipelineError::TimedOut(limit.as_secs()))
            }
        }
    }

    async fn execute(
        &self,
        request: ValidatedRequest,
        generator: Arc<dyn TextGenerator>,
        reporter: &Reporter,
    ) -> Result<GenerationResult, PipelineError> {
        let progress_config = &self.config.progress;

        // Crawling
        reporter.progress(
            Stage::Crawling,
            format!("Crawling {} (up to {} pages)", request.url, request.max_pages),
            progress::CRAWL_START,
            estimate_eta(Stage::Crawling, 0, request.max_pages, progress_config),
        );

        let crawler = Crawler::new(
            self.client.clone(),
            &request.url,
            request.max_pages,
            &self.config.crawler,
        )
        .map_err(|e| PipelineError::Internal(e.to_string()))?;
        let pages = crawler.crawl().await;

        if pages.is_empty() {
            return Err(PipelineError::NoPages);
        }

        reporter.progress(
            Stage::Crawling,
            format!("Crawled {} pages", pages.len()),
            progress::CRAWL_DONE,
            None,
        );

        // Analyzing
        let analyzer = Analyzer::new(generator, &self.config.analyzer);
        let tutorials = analyzer
            .analyze_with_progress(&pages, |batch| {
                reporter.progress(
                    Stage::Analyzing,
                    format!(
                        "Analyzing batch {}/{} ({} pages)",
                        batch.index + 1,
                        batch.total_batches,
                        batch.total_pages
                    ),
                    analysis_progress(batch.pages_before, batch.total_pages),
                    estimate_eta(
                        Stage::Analyzing,
                        batch.index,
                        batch.total_batches,
                        progress_config,
                    ),
                );
            })
            .await;

        if tutorials.is_empty() {
            return Err(PipelineError::NoTutorials);
        }

        reporter.progress(
            Stage::Analyzing,
            format!("Generated {} tutorial ideas", tutorials.len()),
            progress::ANALYSIS_DONE,
            None,
        );

        // Generating
        reporter.progress(
            Stage::Generating,
            "Generating scaffolds and CSV index",
            progress::GENERATING,
            None,
        );

        Ok(build_result(pages.len(), tutorials))
    }
}
