use serde::Deserialize;

/// Main configuration structure for Tutorial Forge
///
/// Every section is optional in the TOML file; missing sections and keys take
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub crawler: CrawlerConfig,
    pub analyzer: AnalyzerConfig,
    pub progress: ProgressConfig,
}

/// HTTP service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Socket address the service listens on
    pub bind_address: String,

    /// Wall-clock ceiling for one generation run (seconds)
    pub max_duration_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            max_duration_secs: 300,
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Page budget used when a request does not specify one
    pub default_max_pages: usize,

    /// Upper bound applied to any requested page budget
    pub max_pages_limit: usize,

    /// Delay between consecutive fetches (milliseconds)
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// Ceiling on extracted page text, in characters
    pub content_max_chars: usize,

    /// User-Agent header sent with every fetch
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            default_max_pages: 30,
            max_pages_limit: 100,
            request_delay_ms: 100,
            request_timeout_secs: 30,
            content_max_chars: 10_000,
            user_agent: format!("Tutorial-Forge-Bot/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Analysis stage and generative-text service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AnalyzerConfig {
    /// Number of pages per service call
    pub batch_size: usize,

    /// Delay between consecutive batches (milliseconds)
    pub batch_delay_ms: u64,

    /// Characters of page content included in the prompt
    pub preview_chars: usize,

    /// Model identifier sent to the service
    pub model: String,

    /// Maximum tokens the service may generate per call
    pub max_tokens: u32,

    /// Base URL of the Messages API
    pub api_base_url: String,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Per-call timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_delay_ms: 1000,
            preview_chars: 500,
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 4096,
            api_base_url: "https://api.anthropic.com".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// Constants for the advisory ETA heuristics
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProgressConfig {
    pub seconds_per_page: u64,
    pub seconds_per_batch: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            seconds_per_page: 2,
            seconds_per_batch: 20,
        }
    }
}

impl Config {
    /// Reads the service credential from the configured environment variable
    ///
    /// Empty values count as absent.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.analyzer.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
