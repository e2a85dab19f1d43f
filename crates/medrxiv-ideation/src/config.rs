//! Configuration for the medRxiv ideation pipeline.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// medRxiv details endpoint (bioRxiv API, medRxiv server).
    pub const PREPRINT_API: &str = "https://api.biorxiv.org/details/medrxiv";

    /// Semantic Scholar Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// SeeChat hypothesis service.
    pub const SEECHAT_API: &str = "https://api.staging.seechat.ai";

    /// Public page for a published hypothesis.
    pub const IDEA_URL: &str = "https://staging.seechat.ai/idea";

    /// API version sent to the Azure AI inference chat endpoint.
    pub const LLM_API_VERSION: &str = "2024-05-01-preview";

    /// Token cap for the problem statement completion.
    pub const LLM_MAX_TOKENS: u32 = 100;

    /// Per-page preprint fetch timeout.
    pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

    /// Semantic Scholar lookup timeout.
    pub const SCHOLAR_TIMEOUT: Duration = Duration::from_secs(30);

    /// Chat completion timeout.
    pub const LLM_TIMEOUT: Duration = Duration::from_secs(60);

    /// Hypothesis create/edit timeout (create streams its whole generation).
    pub const PUBLISH_TIMEOUT: Duration = Duration::from_secs(180);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Pause after every successful Semantic Scholar call (1 req/s).
    pub const COURTESY_DELAY: Duration = Duration::from_secs(1);

    /// Lookback window when no start date is given.
    pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

    /// Processed-title ledger location.
    pub const LEDGER_FILE: &str = "processed_titles.txt";
}

/// Fixed values attached to every published hypothesis.
pub mod publish {
    /// `field_of_study_1` on create.
    pub const FIELD_OF_STUDY: &str = "Medicine";

    /// `data_source` on create.
    pub const DATA_SOURCE: &str = "medRxiv";
}

/// Environment variable names.
pub mod env {
    /// SeeChat API key (required).
    pub const SEECHAT_API_KEY: &str = "SEECHAT_API_KEY";
    /// Azure AI inference key (required).
    pub const LLM_API_KEY: &str = "AZURE_LLAMA_KEY";
    /// Azure AI inference endpoint (required).
    pub const LLM_ENDPOINT: &str = "AZURE_LLAMA_ENDPOINT";
    /// Deployment/model name, for endpoints serving several models.
    pub const LLM_MODEL: &str = "AZURE_LLAMA_MODEL";
    /// Semantic Scholar API key (required only when ranking).
    pub const SCHOLAR_API_KEY: &str = "SEMANTIC_SCHOLAR_API_KEY";
    /// Override for the preprint details endpoint.
    pub const PREPRINT_API_URL: &str = "PREPRINT_API_URL";
    /// Override for the Graph API endpoint.
    pub const SCHOLAR_API_URL: &str = "SEMANTIC_SCHOLAR_API_URL";
    /// Override for the hypothesis service.
    pub const SEECHAT_API_URL: &str = "SEECHAT_API_URL";
    /// Override for the idea page base.
    pub const SEECHAT_IDEA_URL: &str = "SEECHAT_IDEA_URL";
}

/// Pipeline configuration.
#[derive(Clone)]
pub struct Config {
    /// Preprint details endpoint; `/{start}/{end}/{cursor}` is appended.
    pub preprint_api_url: String,

    /// Semantic Scholar Graph API base URL.
    pub graph_api_url: String,

    /// Semantic Scholar API key.
    pub scholar_api_key: Option<String>,

    /// Chat completion endpoint base (`/chat/completions` is appended).
    pub llm_endpoint: String,

    /// Chat completion key.
    pub llm_api_key: String,

    /// Optional model name sent with each completion.
    pub llm_model: Option<String>,

    /// Hypothesis service base URL.
    pub publish_api_url: String,

    /// Hypothesis service key.
    pub publish_api_key: String,

    /// Base for printed idea links.
    pub idea_url: String,

    /// Value for `field_of_study_1`.
    pub field_of_study: String,

    /// Value for `data_source`.
    pub data_source: String,

    /// Per-page fetch timeout.
    pub fetch_timeout: Duration,

    /// Semantic Scholar timeout.
    pub scholar_timeout: Duration,

    /// Completion timeout.
    pub llm_timeout: Duration,

    /// Create/edit timeout.
    pub publish_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Pause after each successful bibliographic lookup.
    pub courtesy_delay: Duration,

    /// Days to look back when no start date is given.
    pub lookback_days: u32,

    /// Ledger file path.
    pub ledger_path: PathBuf,
}

impl Config {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required credential or endpoint is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::MissingVar { var: name });
        let endpoint = |name: &'static str, default: &str| {
            let value = get(name).unwrap_or_else(|| default.to_string());
            validate_url(name, &value)
        };

        let publish_api_key = require(env::SEECHAT_API_KEY)?;
        let llm_api_key = require(env::LLM_API_KEY)?;
        let llm_endpoint = validate_url(env::LLM_ENDPOINT, &require(env::LLM_ENDPOINT)?)?;

        Ok(Self {
            preprint_api_url: endpoint(env::PREPRINT_API_URL, api::PREPRINT_API)?,
            graph_api_url: endpoint(env::SCHOLAR_API_URL, api::GRAPH_API)?,
            scholar_api_key: get(env::SCHOLAR_API_KEY),
            llm_endpoint,
            llm_api_key,
            llm_model: get(env::LLM_MODEL),
            publish_api_url: endpoint(env::SEECHAT_API_URL, api::SEECHAT_API)?,
            publish_api_key,
            idea_url: endpoint(env::SEECHAT_IDEA_URL, api::IDEA_URL)?,
            field_of_study: publish::FIELD_OF_STUDY.to_string(),
            data_source: publish::DATA_SOURCE.to_string(),
            fetch_timeout: api::FETCH_TIMEOUT,
            scholar_timeout: api::SCHOLAR_TIMEOUT,
            llm_timeout: api::LLM_TIMEOUT,
            publish_timeout: api::PUBLISH_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            courtesy_delay: api::COURTESY_DELAY,
            lookback_days: api::DEFAULT_LOOKBACK_DAYS,
            ledger_path: PathBuf::from(api::LEDGER_FILE),
        })
    }

    /// Create a test configuration with every service on one mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            preprint_api_url: format!("{base_url}/details/medrxiv"),
            graph_api_url: format!("{base_url}/graph/v1"),
            scholar_api_key: Some("test-scholar-key".to_string()),
            llm_endpoint: format!("{base_url}/models"),
            llm_api_key: "test-llm-key".to_string(),
            llm_model: None,
            publish_api_url: base_url.to_string(),
            publish_api_key: "test-seechat-key".to_string(),
            idea_url: format!("{base_url}/idea"),
            field_of_study: publish::FIELD_OF_STUDY.to_string(),
            data_source: publish::DATA_SOURCE.to_string(),
            fetch_timeout: Duration::from_secs(5),
            scholar_timeout: Duration::from_secs(5),
            llm_timeout: Duration::from_secs(5),
            publish_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            courtesy_delay: Duration::from_millis(0), // No delay in tests
            lookback_days: api::DEFAULT_LOOKBACK_DAYS,
            ledger_path: PathBuf::from(api::LEDGER_FILE),
        }
    }

    /// Check if a Semantic Scholar key is configured.
    #[must_use]
    pub const fn has_scholar_key(&self) -> bool {
        self.scholar_api_key.is_some()
    }

    /// The reputation stage cannot run without a Semantic Scholar key.
    pub fn require_scholar_key(&self) -> Result<&str, ConfigError> {
        self.scholar_api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar { var: env::SCHOLAR_API_KEY })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("preprint_api_url", &self.preprint_api_url)
            .field("graph_api_url", &self.graph_api_url)
            .field("llm_endpoint", &self.llm_endpoint)
            .field("publish_api_url", &self.publish_api_url)
            .field("has_scholar_key", &self.has_scholar_key())
            .field("lookback_days", &self.lookback_days)
            .field("ledger_path", &self.ledger_path)
            .finish_non_exhaustive()
    }
}

/// Validate an absolute URL and strip any trailing slash.
fn validate_url(var: &'static str, value: &str) -> Result<String, ConfigError> {
    url::Url::parse(value).map_err(|source| ConfigError::InvalidUrl { var, source })?;
    Ok(value.trim_end_matches('/').to_string())
}
