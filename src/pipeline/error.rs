//! Validation and pipeline-fatal errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-facing message for failures that are not the caller's fault
pub const UNEXPECTED_FAILURE: &str = "Failed to generate tutorials";

/// Why a generation run did not produce a result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid URL format")]
    InvalidUrl,

    #[error("API key not configured")]
    MissingCredential,

    #[error("No pages could be crawled from the provided URL")]
    NoPages,

    #[error("No tutorial ideas could be generated")]
    NoTutorials,

    #[error("Generation exceeded the {0} second limit")]
    TimedOut(u64),

    #[error("{0}")]
    Internal(String),
}

/// JSON body of a buffered error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl PipelineError {
    /// HTTP status for the buffered mode
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingUrl | Self::InvalidUrl | Self::NoPages | Self::NoTutorials => 400,
            Self::MissingCredential | Self::TimedOut(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true for failures outside the caller's control
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::TimedOut(_) | Self::Internal(_))
    }

    pub fn to_body(&self) -> ErrorBody {
        if self.is_unexpected() {
            ErrorBody {
                error: UNEXPECTED_FAILURE.to_string(),
                details: Some(self.to_string()),
            }
        } else {
            ErrorBody {
                error: self.to_string(),
                details: None,
            }
        }
    }
}
