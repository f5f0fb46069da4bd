//! Output module for tutorial scaffolds and indexes
//!
//! This module handles:
//! - Scaffold filenames derived from tutorial titles
//! - The Markdown scaffold for each tutorial
//! - The CSV index of all tutorials in a run
//! - Writing a complete bundle to disk

mod bundle;
mod csv;
mod filename;
mod markdown;

pub use bundle::{write_bundle, INDEX_FILENAME, README_FILENAME};
pub use csv::{escape_csv, generate_csv};
pub use filename::{slugify, tutorial_filename};
pub use markdown::{render_readme, render_scaffold};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
