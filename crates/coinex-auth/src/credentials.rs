//! Authentication credentials for the CoinEx API
//!
//! Implements HMAC-SHA256 signing as required by CoinEx's v2 endpoints.
//!
//! # Security
//!
//! Secret keys are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha256;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the access id
pub const ACCESS_ID_ENV: &str = "COINEX_ACCESS_ID";
/// Environment variable holding the secret key
pub const SECRET_KEY_ENV: &str = "COINEX_SECRET_KEY";

/// Encode a string as Latin-1 (ISO-8859-1) bytes
///
/// Fails on the first character above U+00FF.
pub fn latin1_bytes(s: &str) -> AuthResult<Vec<u8>> {
    s.char_indices()
        .map(|(position, ch)| u8::try_from(ch).map_err(|_| AuthError::NonLatin1 { ch, position }))
        .collect()
}

/// Current Unix time in milliseconds, as a decimal string
pub fn generate_timestamp() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Build the string that gets signed for a request
///
/// `METHOD + request_path + body + timestamp`, with the method upper-cased.
pub fn signable_string(method: &str, request_path: &str, body: &str, timestamp: &str) -> String {
    let method = method.to_ascii_uppercase();
    let mut prepared =
        String::with_capacity(method.len() + request_path.len() + body.len() + timestamp.len());
    prepared.push_str(&method);
    prepared.push_str(request_path);
    prepared.push_str(body);
    prepared.push_str(timestamp);
    prepared
}

/// API credentials for authenticated requests
///
/// The secret key is kept as its Latin-1 bytes and zeroized when the
/// Credentials are dropped.
pub struct Credentials {
    /// Access id (public)
    access_id: String,
    /// Secret key bytes (zeroized on drop)
    secret_key: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an access id and secret key
    ///
    /// # Errors
    /// Returns `InvalidCredentials` if either value is empty or the secret
    /// contains characters outside Latin-1.
    pub fn new(access_id: impl Into<String>, secret_key: impl AsRef<str>) -> AuthResult<Self> {
        let access_id = access_id.into();
        let secret_key = secret_key.as_ref();

        if access_id.is_empty() {
            return Err(AuthError::InvalidCredentials("empty access id".to_string()));
        }
        if secret_key.is_empty() {
            return Err(AuthError::InvalidCredentials("empty secret key".to_string()));
        }

        let key_bytes = latin1_bytes(secret_key).map_err(|e| {
            AuthError::InvalidCredentials(format!("secret key is not Latin-1: {}", e))
        })?;

        Ok(Self {
            access_id,
            secret_key: SecretBox::new(Box::new(key_bytes)),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `COINEX_ACCESS_ID` and `COINEX_SECRET_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let access_id = std::env::var(ACCESS_ID_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(ACCESS_ID_ENV.to_string()))?;
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_KEY_ENV.to_string()))?;

        debug!("Loaded CoinEx credentials from environment");
        Self::new(access_id, secret_key)
    }

    /// Get the access id
    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    /// HMAC-SHA256 a prepared string, returning the lower-case hex digest
    pub fn sign_payload(&self, prepared: &str) -> AuthResult<String> {
        let message = latin1_bytes(prepared)?;

        let mut mac = HmacSha256::new_from_slice(self.secret_key.expose_secret())
            .map_err(|e| AuthError::InvalidCredentials(e.to_string()))?;
        mac.update(&message);

        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Sign a request for CoinEx's API
    ///
    /// # Arguments
    /// * `method` - HTTP method, upper-cased before signing
    /// * `request_path` - `/v2` path including the query string
    /// * `body` - Canonical JSON body, or `""` when there is none
    /// * `timestamp` - Millisecond timestamp sent in `X-COINEX-TIMESTAMP`
    pub fn sign(
        &self,
        method: &str,
        request_path: &str,
        body: &str,
        timestamp: &str,
    ) -> AuthResult<String> {
        self.sign_payload(&signable_string(method, request_path, body, timestamp))
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            access_id: self.access_id.clone(),
            secret_key: SecretBox::new(Box::new(self.secret_key.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.access_id.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("access_id", &format!("{}...", visible))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Request signer bound to a single timestamp
///
/// The same timestamp must be both signed and sent in the headers, so it is
/// captured once when the signer is created.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    timestamp: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer stamped with the current time
    pub fn new(credentials: &'a Credentials) -> Self {
        Self::with_timestamp(credentials, generate_timestamp())
    }

    /// Create a signer with a fixed timestamp
    pub fn with_timestamp(credentials: &'a Credentials, timestamp: impl Into<String>) -> Self {
        Self {
            credentials,
            timestamp: timestamp.into(),
        }
    }

    /// Get the timestamp for this request
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the access id
    pub fn access_id(&self) -> &str {
        self.credentials.access_id()
    }

    /// Sign the request
    pub fn sign(&self, method: &str, request_path: &str, body: &str) -> AuthResult<String> {
        self.credentials
            .sign(method, request_path, body, &self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> Credentials {
        Credentials::new("test_access_id", "test_secret_key").unwrap()
    }

    #[test]
    fn test_hmac_known_vector() {
        let creds = Credentials::new("id", "key").unwrap();
        assert_eq!(
            creds
                .sign_payload("The quick brown fox jumps over the lazy dog")
                .unwrap(),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_sign_concatenates_in_order() {
        let creds = Credentials::new(
            "id",
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j",
        )
        .unwrap();

        // Empty method and body collapse the signable string to path + timestamp
        let signature = creds.sign("", "timestamp=", "", "1578963600000").unwrap();
        assert_eq!(
            signature,
            "d84e6641b1e328e7b418fff030caed655c266299c9355e36ce801ed14631eed4"
        );
    }

    #[test]
    fn test_signable_string() {
        let prepared = signable_string(
            "get",
            "/v2/spot/depth?market=BTCUSDT&limit=5&interval=0",
            "",
            "1700000000000",
        );
        assert_eq!(
            prepared,
            "GET/v2/spot/depth?market=BTCUSDT&limit=5&interval=01700000000000"
        );
    }

    #[test]
    fn test_method_case_does_not_change_signature() {
        let creds = test_credentials();
        let lower = creds.sign("post", "/v2/futures/order", "{}", "1").unwrap();
        let upper = creds.sign("POST", "/v2/futures/order", "{}", "1").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let sig = test_credentials()
            .sign("GET", "/v2/assets/spot/balance", "", "1700000000000")
            .unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_latin1_secret() {
        let latin = Credentials::new("id", "clé").unwrap();
        let raw = Credentials::new("id", "cl\u{e9}").unwrap();
        assert_eq!(
            latin.sign_payload("payload").unwrap(),
            raw.sign_payload("payload").unwrap()
        );

        let err = Credentials::new("id", "ключ").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[test]
    fn test_latin1_encoding() {
        assert_eq!(latin1_bytes("a\u{e9}").unwrap(), vec![b'a', 0xE9]);
        assert!(matches!(
            latin1_bytes("ab€"),
            Err(AuthError::NonLatin1 { ch: '€', position: 2 })
        ));
    }

    #[test]
    fn test_non_latin1_message_rejected() {
        let result = test_credentials().sign("GET", "/v2/spot/deals?market=€", "", "1");
        assert!(matches!(result, Err(AuthError::NonLatin1 { .. })));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(Credentials::new("", "secret").is_err());
        assert!(Credentials::new("id", "").is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let debug = format!("{:?}", test_credentials());
        assert!(!debug.contains("test_secret_key"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("test_acc..."));
    }

    #[test]
    fn test_clone_signs_identically() {
        let creds = test_credentials();
        let cloned = creds.clone();
        assert_eq!(
            creds.sign_payload("x").unwrap(),
            cloned.sign_payload("x").unwrap()
        );
    }

    #[test]
    fn test_timestamp_is_millis() {
        let ts = generate_timestamp();
        assert!(ts.chars().all(|c| c.is_ascii_digit()));
        // Milliseconds since epoch have 13 digits until the year 2286
        assert_eq!(ts.len(), 13);
    }

    #[test]
    fn test_request_signer_uses_fixed_timestamp() {
        let creds = test_credentials();
        let signer = RequestSigner::with_timestamp(&creds, "1700000000000");
        assert_eq!(signer.timestamp(), "1700000000000");
        assert_eq!(signer.access_id(), "test_access_id");
        assert_eq!(
            signer.sign("GET", "/v2/ping", "").unwrap(),
            creds.sign("GET", "/v2/ping", "", "1700000000000").unwrap()
        );
    }
}
