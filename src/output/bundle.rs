//! Writing a generation result to a directory

use crate::output::markdown::render_readme;
use crate::output::OutputResult;
use crate::pipeline::GenerationResult;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the CSV index inside a bundle
pub const INDEX_FILENAME: &str = "tutorial-index.csv";

/// File name of the bundle README
pub const README_FILENAME: &str = "README.md";

/// Writes every scaffold, the CSV index and a README into `dir`
///
/// The directory is created if needed; existing files with the same names
/// are overwritten.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths written, scaffolds first
/// * `Err(OutputError)` - A directory or file could not be written
pub fn write_bundle(
    dir: &Path,
    source_url: &str,
    result: &GenerationResult,
) -> OutputResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(result.files.len() + 2);

    for file in &result.files {
        let path = dir.join(&file.filename);
        fs::write(&path, &file.content)?;
        written.push(path);
    }

    let index_path = dir.join(INDEX_FILENAME);
    fs::write(&index_path, &result.csv)?;
    written.push(index_path);

    let readme_path = dir.join(README_FILENAME);
    fs::write(&readme_path, render_readme(source_url, Utc::now(), result))?;
    written.push(readme_path);

    tracing::info!("Wrote {} files to {}", written.len(), dir.display());

    Ok(written)
}
