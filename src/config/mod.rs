//! Configuration module for Tutorial Forge
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All sections are optional; an empty file yields the defaults.
//!
//! # Example
//!
//! ```no_run
//! use tutorial_forge::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("forge.toml")).unwrap();
//! println!("Default page budget: {}", config.crawler.default_max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AnalyzerConfig, Config, CrawlerConfig, ProgressConfig, ServerConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
