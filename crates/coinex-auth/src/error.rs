//! Error types for authentication operations

/// Errors that can occur while preparing credentials or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Signable string contains a character that has no Latin-1 encoding
    #[error("Character {ch:?} at byte {position} cannot be encoded as Latin-1")]
    NonLatin1 { ch: char, position: usize },

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
