//! Extraction of tutorial ideas from free-text model replies

use crate::analyzer::cost::estimate_idea_cost;
use crate::analyzer::types::TutorialIdea;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

/// From the first `[` to the last `]`, across lines
static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("array regex is valid"));

/// Why a reply yielded no ideas at all
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("No JSON array found in response")]
    NoJsonArray,

    #[error("Malformed JSON array: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parses a model reply into costed tutorial ideas
///
/// The reply may wrap the array in prose or a code fence. Array entries that
/// are not objects are skipped with a warning. Every object is kept, with
/// wrong-typed fields defaulted, and gets its `estimated_cost` computed.
///
/// # Returns
///
/// * `Ok(Vec<TutorialIdea>)` - Ideas in reply order (possibly empty)
/// * `Err(ResponseError)` - No array literal, or the literal is not valid JSON
pub fn parse_response(text: &str) -> Result<Vec<TutorialIdea>, ResponseError> {
    let literal = JSON_ARRAY
        .find(text)
        .ok_or(ResponseError::NoJsonArray)?
        .as_str();

    let entries: Vec<Value> = serde_json::from_str(literal)?;
    let mut ideas = Vec::with_capacity(entries.len());

    for (position, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            tracing::warn!("Skipping idea {}: not a JSON object", position + 1);
            continue;
        }

        match serde_json::from_value::<TutorialIdea>(entry) {
            Ok(mut idea) => {
                idea.estimated_cost = estimate_idea_cost(&idea);
                ideas.push(idea);
            }
            Err(e) => {
                tracing::warn!("Skipping idea {}: {}", position + 1, e);
            }
        }
    }

    Ok(ideas)
}
