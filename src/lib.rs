//! Tutorial Forge: documentation sites in, tutorial outlines out
//!
//! This crate crawls a documentation website breadth-first, sends batches of
//! the collected page text to a generative text service, and turns the
//! structured reply into tutorial records with deterministic cost estimates.
//! Progress is reported as discrete events so callers can stream it.

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for Tutorial Forge operations
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Tutorial Forge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

// Re-export commonly used types
pub use analyzer::{Analyzer, Difficulty, TutorialIdea, TutorialSection};
pub use config::Config;
pub use crawler::{CrawledPage, Crawler};
pub use pipeline::{GenerationResult, Pipeline, ProgressEvent};
pub use url::{extract_domain, normalize_url};
