//! Error types for parsing shared CoinEx values

use thiserror::Error;

/// Errors raised while converting strings into typed CoinEx values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// String did not name a known variant
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    /// Timestamp outside the representable range
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

impl TypesError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.to_string(),
        }
    }
}
