//! Tutorial records produced by the analysis stage

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Difficulty level of a tutorial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parses a difficulty label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Returns the canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One section of a tutorial outline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialSection {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_strings")]
    pub topics: Vec<String>,
}

/// A synthesized outline for a prospective tutorial
///
/// Model output is loosely structured, so no field rejects an idea: missing
/// or wrong-typed strings and lists default to empty, numbers in string
/// fields are kept as text, and an unknown difficulty label becomes `None`
/// (serialized as an omitted field).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TutorialIdea {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(
        deserialize_with = "lenient_difficulty",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
    #[serde(deserialize_with = "lenient_string")]
    pub estimated_time: String,
    /// Derived by the analyzer; any value supplied by the model is replaced
    #[serde(deserialize_with = "lenient_cost")]
    pub estimated_cost: u32,
    #[serde(deserialize_with = "lenient_strings")]
    pub prerequisites: Vec<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub learning_objectives: Vec<String>,
    #[serde(deserialize_with = "lenient_sections")]
    pub outline: Vec<TutorialSection>,
    #[serde(deserialize_with = "lenient_strings")]
    pub resources: Vec<String>,
}

impl TutorialIdea {
    /// Label used by formatters; empty when the difficulty is unknown
    pub fn difficulty_label(&self) -> &'static str {
        self.difficulty.map(|d| d.as_str()).unwrap_or("")
    }
}

/// Text of a scalar JSON value; arrays, objects and null give `None`
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text).unwrap_or_default())
}

/// A non-array becomes empty; non-scalar elements are dropped
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    })
}

/// A non-array becomes empty; sections that are not objects are dropped
fn lenient_sections<'de, D>(deserializer: D) -> Result<Vec<TutorialSection>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Accepts any JSON value for `difficulty`; only recognised labels survive
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(Difficulty::from_label))
}

/// Accepts any JSON value for `estimatedCost`; non-numeric values become 0
fn lenient_cost<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|cost| cost.is_finite() && *cost >= 0.0)
        .map(|cost| cost.round().min(f64::from(u32::MAX)) as u32)
        .unwrap_or(0))
}
