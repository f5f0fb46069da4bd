//! Generation requests and their validation

use crate::config::CrawlerConfig;
use crate::pipeline::error::PipelineError;
use crate::url::normalize_url;
use serde::Deserialize;

/// Body of a generation request, as sent by callers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerateRequest {
    pub url: Option<String>,
    pub max_pages: Option<i64>,
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// Normalized seed URL
    pub url: String,
    /// Page budget within `1..=max-pages-limit`
    pub max_pages: usize,
}

impl GenerateRequest {
    pub fn new(url: impl Into<String>, max_pages: Option<i64>) -> Self {
        Self {
            url: Some(url.into()),
            max_pages,
        }
    }

    /// Checks the request before any work starts
    ///
    /// # Order
    ///
    /// 1. `url` present and non-blank, else [`PipelineError::MissingUrl`]
    /// 2. `url` is an absolute HTTP(S) URL, else [`PipelineError::InvalidUrl`]
    /// 3. a service credential exists, else [`PipelineError::MissingCredential`]
    ///
    /// `maxPages` never fails: it defaults to `default-max-pages` and is
    /// clamped to `1..=max-pages-limit`.
    pub fn validate(
        &self,
        config: &CrawlerConfig,
        credential_present: bool,
    ) -> Result<ValidatedRequest, PipelineError> {
        let raw = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(PipelineError::MissingUrl)?;

        let url = normalize_url(raw).map_err(|e| {
            tracing::debug!("Rejected seed URL {}: {}", raw, e);
            PipelineError::InvalidUrl
        })?;

        if !credential_present {
            return Err(PipelineError::MissingCredential);
        }

        let limit = config.max_pages_limit.max(1);
        let max_pages = match self.max_pages {
            Some(requested) => usize::try_from(requested.max(1))
                .unwrap_or(limit)
                .min(limit),
            None => config.default_max_pages.clamp(1, limit),
        };

        Ok(ValidatedRequest { url, max_pages })
    }
}
