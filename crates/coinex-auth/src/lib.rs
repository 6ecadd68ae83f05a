//! Credentials and request signing for the CoinEx API
//!
//! Every authenticated CoinEx v2 request carries three headers:
//! `X-COINEX-KEY`, `X-COINEX-SIGN` and `X-COINEX-TIMESTAMP`. The signature is
//! the lower-case hex HMAC-SHA256 of `METHOD + path?query + body + timestamp`
//! keyed by the secret.
//!
//! # Example
//!
//! ```no_run
//! use coinex_auth::{to_canonical_json, Credentials, RequestSigner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//! let signer = RequestSigner::new(&creds);
//!
//! let body = to_canonical_json(&serde_json::json!({"market": "BTCUSDT"}))?;
//! let signature = signer.sign("POST", "/v2/futures/order", &body)?;
//! println!("{} {}", signer.timestamp(), signature);
//! # Ok(())
//! # }
//! ```

mod canonical;
mod credentials;
mod error;

pub use canonical::{canonical_body, to_canonical_json, CanonicalFormatter};
pub use credentials::{
    generate_timestamp, latin1_bytes, signable_string, Credentials, RequestSigner, ACCESS_ID_ENV,
    SECRET_KEY_ENV,
};
pub use error::{AuthError, AuthResult};
