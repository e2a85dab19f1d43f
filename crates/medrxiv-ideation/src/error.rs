//! Error types for the medRxiv ideation pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Only [`ConfigError`] is allowed to abort a run; everything else is contained at the
//! paper boundary by the pipeline.

use std::path::PathBuf;
use std::time::Duration;

/// Errors from the outbound HTTP collaborators (preprint source, Semantic Scholar,
/// LLM endpoint, hypothesis service).
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, body read, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by the remote service (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the service
        message: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// The service answered successfully but with nothing usable.
    #[error("Empty response from {service}")]
    EmptyResponse {
        /// Which collaborator returned nothing
        service: &'static str,
    },

    /// A required field never appeared in the response.
    #[error("Response is missing '{field}'")]
    MissingField {
        /// Name of the field
        field: &'static str,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Map a reqwest failure, folding timeouts into [`ClientError::Timeout`].
    #[must_use]
    pub fn transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() { Self::Timeout(timeout) } else { Self::Http(err) }
    }

    /// Returns true for network-level and status failures, false for payload problems.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        !matches!(self, Self::Parse(_) | Self::EmptyResponse { .. } | Self::MissingField { .. })
    }
}

/// Startup configuration errors. These are fatal and raised before any network call.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or blank
    #[error("Missing required setting {var}")]
    MissingVar {
        /// Variable name
        var: &'static str,
    },

    /// A configured endpoint is not a valid absolute URL
    #[error("Invalid URL in {var}: {source}")]
    InvalidUrl {
        /// Variable name
        var: &'static str,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// A date could not be parsed as YYYY-MM-DD
    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        /// Raw input
        value: String,
        /// Parser error
        #[source]
        source: chrono::ParseError,
    },

    /// Start date falls after end date
    #[error("Start date {start} is after end date {end}")]
    InvalidRange {
        /// Requested start
        start: chrono::NaiveDate,
        /// Requested end
        end: chrono::NaiveDate,
    },
}

/// Errors from the processed-title ledger file.
#[derive(thiserror::Error, Debug)]
#[error("Ledger I/O failed on {}: {source}", path.display())]
pub struct LedgerError {
    /// Ledger file path
    pub path: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: std::io::Error,
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
