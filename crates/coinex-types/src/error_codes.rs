//! CoinEx API error code mapping with recovery strategies
//!
//! Every v2 response carries a numeric `code` (0 on success) and a
//! `message`. This module classifies the non-zero codes so callers can decide
//! how to react. Nothing here retries on its own.

use std::time::Duration;

/// Recovery strategy for handling API errors
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecoveryStrategy {
    /// Exponential backoff before retry
    Backoff {
        initial_ms: u64,
        max_ms: u64,
        multiplier: u32,
    },
    /// Fixed delay retry
    Retry { delay_ms: u64, max_attempts: u32 },
    /// Refresh the local clock or credentials and sign again
    Resign,
    /// Cannot recover programmatically
    Fatal,
    /// Requires user intervention (e.g., add funds)
    UserAction { message: &'static str },
    /// Manual investigation needed
    #[default]
    Manual,
}

impl RecoveryStrategy {
    /// Default exponential backoff for rate limits
    pub fn rate_limit_backoff() -> Self {
        Self::Backoff {
            initial_ms: 1000,
            max_ms: 60000,
            multiplier: 2,
        }
    }

    /// Default retry for transient service errors
    pub fn service_retry() -> Self {
        Self::Retry {
            delay_ms: 1000,
            max_attempts: 3,
        }
    }

    /// Get the initial delay duration
    pub fn initial_delay(&self) -> Option<Duration> {
        match self {
            Self::Backoff { initial_ms, .. } => Some(Duration::from_millis(*initial_ms)),
            Self::Retry { delay_ms, .. } => Some(Duration::from_millis(*delay_ms)),
            _ => None,
        }
    }

    /// Check if this strategy allows retry
    pub fn allows_retry(&self) -> bool {
        matches!(self, Self::Backoff { .. } | Self::Retry { .. } | Self::Resign)
    }
}

/// Broad grouping of CoinEx error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 3xxx: business rule rejected the request (balance, order limits, ...)
    Business,
    /// 4xxx: request, authentication or service availability problem
    Request,
    /// Anything else
    Unknown,
}

/// Known CoinEx v2 error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoinexErrorCode {
    /// 3008: service busy
    ServiceBusy,
    /// 3109: insufficient balance
    InsufficientBalance,
    /// 3127: order quantity below the market minimum
    AmountTooSmall,
    /// 3606: order price too far from the latest price
    PriceDeviationTooLarge,
    /// 3610: cancellation prohibited during the call auction
    CancelDuringCallAuction,
    /// 4001: service unavailable
    ServiceUnavailable,
    /// 4002: service request timed out
    ServiceTimeout,
    /// 4003: internal error
    InternalError,
    /// 4004: parameter error
    InvalidParameter,
    /// 4005: abnormal access_id
    InvalidAccessId,
    /// 4006: signature verification failed
    InvalidSignature,
    /// 4007: IP address prohibited
    IpProhibited,
    /// 4008: abnormal X-COINEX-SIGN value
    InvalidSignHeader,
    /// 4009: abnormal request method
    InvalidMethod,
    /// 4010: expired request
    RequestExpired,
    /// 4011: user prohibited from accessing
    UserProhibited,
    /// 4017: signature expired
    SignatureExpired,
    /// 4115: user prohibited from trading
    TradingProhibited,
    /// 4117: trading prohibited in this market
    MarketTradingProhibited,
    /// 4130: futures trading prohibited
    FuturesTradingProhibited,
    /// 4213: request too frequent
    RateLimited,
}

impl CoinexErrorCode {
    /// Map a numeric response code to a known error
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            3008 => Self::ServiceBusy,
            3109 => Self::InsufficientBalance,
            3127 => Self::AmountTooSmall,
            3606 => Self::PriceDeviationTooLarge,
            3610 => Self::CancelDuringCallAuction,
            4001 => Self::ServiceUnavailable,
            4002 => Self::ServiceTimeout,
            4003 => Self::InternalError,
            4004 => Self::InvalidParameter,
            4005 => Self::InvalidAccessId,
            4006 => Self::InvalidSignature,
            4007 => Self::IpProhibited,
            4008 => Self::InvalidSignHeader,
            4009 => Self::InvalidMethod,
            4010 => Self::RequestExpired,
            4011 => Self::UserProhibited,
            4017 => Self::SignatureExpired,
            4115 => Self::TradingProhibited,
            4117 => Self::MarketTradingProhibited,
            4130 => Self::FuturesTradingProhibited,
            4213 => Self::RateLimited,
            _ => return None,
        })
    }

    /// Numeric code as returned by the API
    pub fn code(&self) -> i64 {
        match self {
            Self::ServiceBusy => 3008,
            Self::InsufficientBalance => 3109,
            Self::AmountTooSmall => 3127,
            Self::PriceDeviationTooLarge => 3606,
            Self::CancelDuringCallAuction => 3610,
            Self::ServiceUnavailable => 4001,
            Self::ServiceTimeout => 4002,
            Self::InternalError => 4003,
            Self::InvalidParameter => 4004,
            Self::InvalidAccessId => 4005,
            Self::InvalidSignature => 4006,
            Self::IpProhibited => 4007,
            Self::InvalidSignHeader => 4008,
            Self::InvalidMethod => 4009,
            Self::RequestExpired => 4010,
            Self::UserProhibited => 4011,
            Self::SignatureExpired => 4017,
            Self::TradingProhibited => 4115,
            Self::MarketTradingProhibited => 4117,
            Self::FuturesTradingProhibited => 4130,
            Self::RateLimited => 4213,
        }
    }

    /// Get the recommended recovery strategy
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::RateLimited => RecoveryStrategy::rate_limit_backoff(),
            Self::ServiceBusy | Self::ServiceUnavailable | Self::ServiceTimeout => {
                RecoveryStrategy::service_retry()
            }
            // Timestamp drifted past the server's receive window
            Self::RequestExpired | Self::SignatureExpired => RecoveryStrategy::Resign,
            Self::InsufficientBalance => RecoveryStrategy::UserAction {
                message: "Deposit funds or reduce the order amount",
            },
            Self::AmountTooSmall | Self::PriceDeviationTooLarge | Self::InvalidParameter => {
                RecoveryStrategy::Fatal
            }
            Self::InvalidAccessId
            | Self::InvalidSignature
            | Self::InvalidSignHeader
            | Self::InvalidMethod => RecoveryStrategy::Fatal,
            Self::IpProhibited
            | Self::UserProhibited
            | Self::TradingProhibited
            | Self::MarketTradingProhibited
            | Self::FuturesTradingProhibited => RecoveryStrategy::UserAction {
                message: "Check account permissions and API key restrictions",
            },
            Self::CancelDuringCallAuction | Self::InternalError => RecoveryStrategy::Manual,
        }
    }
}

/// Parsed CoinEx API error with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinexApiError {
    /// Numeric code from the response envelope
    pub raw_code: i64,
    /// Recognized code, if any
    pub code: Option<CoinexErrorCode>,
    /// Error category
    pub category: ErrorCategory,
    /// Message returned by the API
    pub message: String,
}

impl CoinexApiError {
    /// Build a structured error from a response `code` and `message`
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        let category = match code {
            3000..=3999 => ErrorCategory::Business,
            4000..=4999 => ErrorCategory::Request,
            _ => ErrorCategory::Unknown,
        };

        Self {
            raw_code: code,
            code: CoinexErrorCode::from_code(code),
            category,
            message: message.into(),
        }
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        self.code
            .map(|c| c.recovery_strategy())
            .unwrap_or(RecoveryStrategy::Manual)
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.code, Some(CoinexErrorCode::RateLimited))
    }

    /// Check if the request was rejected during authentication
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.code,
            Some(CoinexErrorCode::InvalidAccessId)
                | Some(CoinexErrorCode::InvalidSignature)
                | Some(CoinexErrorCode::InvalidSignHeader)
                | Some(CoinexErrorCode::RequestExpired)
                | Some(CoinexErrorCode::SignatureExpired)
        )
    }

    /// Check if this is a fatal error that cannot be recovered
    pub fn is_fatal(&self) -> bool {
        matches!(self.recovery_strategy(), RecoveryStrategy::Fatal)
    }
}

impl std::fmt::Display for CoinexApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.raw_code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_round_trip() {
        for code in [3008, 3109, 4001, 4005, 4006, 4010, 4213] {
            let parsed = CoinexErrorCode::from_code(code).unwrap();
            assert_eq!(parsed.code(), code);
        }
        assert!(CoinexErrorCode::from_code(0).is_none());
        assert!(CoinexErrorCode::from_code(9999).is_none());
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        let err = CoinexApiError::new(4213, "The request is too frequent");
        assert!(err.is_rate_limit());
        assert!(err.is_retryable());
        assert_eq!(err.category, ErrorCategory::Request);
        assert_eq!(
            err.recovery_strategy().initial_delay(),
            Some(Duration::from_millis(1000))
        );
    }

    #[test]
    fn test_signature_errors_are_fatal() {
        let err = CoinexApiError::new(4006, "Signature verification failed");
        assert!(err.is_auth_error());
        assert!(err.is_fatal());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_expired_request_can_resign() {
        let err = CoinexApiError::new(4010, "Expired request");
        assert!(err.is_auth_error());
        assert_eq!(err.recovery_strategy(), RecoveryStrategy::Resign);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_unknown_code() {
        let err = CoinexApiError::new(12345, "something new");
        assert_eq!(err.code, None);
        assert_eq!(err.category, ErrorCategory::Unknown);
        assert_eq!(err.recovery_strategy(), RecoveryStrategy::Manual);
        assert_eq!(err.to_string(), "[12345] something new");
    }

    #[test]
    fn test_business_category() {
        let err = CoinexApiError::new(3109, "Insufficient balance");
        assert_eq!(err.category, ErrorCategory::Business);
        assert!(matches!(
            err.recovery_strategy(),
            RecoveryStrategy::UserAction { .. }
        ));
    }
}
