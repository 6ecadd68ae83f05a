//! Error types for REST API operations

use coinex_auth::AuthError;
use coinex_types::error_codes::{CoinexApiError, RecoveryStrategy};

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Credential or signing failure
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// API returned a non-zero code
    #[error("API error: {error}")]
    Api {
        /// Parsed error
        error: CoinexApiError,
    },

    /// Non-success HTTP status without a decodable body
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Milliseconds to wait before retrying
        retry_after_ms: u64,
    },

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

impl RestError {
    /// Create an API error from the response envelope's code and message
    pub fn from_api(code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            error: CoinexApiError::new(code, message),
        }
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::Api { error } => error.recovery_strategy(),
            Self::RateLimited { retry_after_ms } => RecoveryStrategy::Backoff {
                initial_ms: *retry_after_ms,
                max_ms: retry_after_ms.saturating_mul(2),
                multiplier: 1,
            },
            Self::Timeout | Self::Http(_) => RecoveryStrategy::Retry {
                max_attempts: 3,
                delay_ms: 1000,
            },
            Self::HttpStatus { status, .. } if *status >= 500 => RecoveryStrategy::service_retry(),
            Self::HttpStatus { .. } => RecoveryStrategy::Manual,
            Self::Auth(_) | Self::AuthRequired => RecoveryStrategy::Fatal,
            Self::Parse(_) | Self::InvalidParameter(_) => RecoveryStrategy::Fatal,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
            || matches!(self, Self::Api { error } if error.is_rate_limit())
    }

    /// The API error code, if the server rejected the request
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { error } => Some(error.raw_code),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
