//! The success payload of a generation run

use crate::analyzer::TutorialIdea;
use crate::output::{generate_csv, render_scaffold, tutorial_filename};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub pages_crawled: usize,
    pub tutorials_generated: usize,
    pub total_estimated_cost: u64,
}

/// A rendered scaffold together with the record it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub filename: String,
    pub content: String,
    pub tutorial: TutorialIdea,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub success: bool,
    pub stats: GenerationStats,
    pub files: Vec<GeneratedFile>,
    pub csv: String,
}

/// Renders every tutorial and assembles the payload
pub fn build_result(pages_crawled: usize, tutorials: Vec<TutorialIdea>) -> GenerationResult {
    let csv = generate_csv(&tutorials);
    let total_estimated_cost = tutorials
        .iter()
        .map(|t| u64::from(t.estimated_cost))
        .sum();
    let tutorials_generated = tutorials.len();

    let files = tutorials
        .into_iter()
        .enumerate()
        .map(|(index, tutorial)| GeneratedFile {
            filename: tutorial_filename(&tutorial.title, index),
            content: render_scaffold(&tutorial),
            tutorial,
        })
        .collect();

    GenerationResult {
        success: true,
        stats: GenerationStats {
            pages_crawled,
            tutorials_generated,
            total_estimated_cost,
        },
        files,
        csv,
    }
}
