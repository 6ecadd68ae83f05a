//! Request construction, signing and execution
//!
//! Every endpoint funnels through [`RequestExecutor`]. Building a request is
//! split from sending it so the exact bytes that get signed can be checked
//! without a network.

use coinex_auth::{canonical_body, Credentials, RequestSigner};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::types::{ApiResponse, Page};

/// Production API host
pub const BASE_URL: &str = "https://api.coinex.com";

/// Path prefix of every v2 endpoint
pub const API_PREFIX: &str = "/v2";

/// Access id header
pub const HEADER_KEY: &str = "X-COINEX-KEY";
/// Signature header
pub const HEADER_SIGN: &str = "X-COINEX-SIGN";
/// Timestamp header
pub const HEADER_TIMESTAMP: &str = "X-COINEX-TIMESTAMP";
/// Content type sent with every request
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Placeholder for requests without a body
pub const NO_BODY: Option<&()> = None;

/// Longest response body kept in an `HttpStatus` error
const MAX_ERROR_BODY: usize = 512;

/// Wait used when a 429 response has no usable `Retry-After`
const DEFAULT_RETRY_AFTER_MS: u64 = 1000;

/// Ordered query parameters
///
/// Pairs are joined exactly in this order, unencoded.
pub type QueryParams<'a> = Vec<(&'a str, String)>;

/// A fully built request, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// `/v2` path including the query string
    pub request_path: String,
    /// Absolute URL
    pub url: String,
    /// Canonical JSON body, if any
    pub body: Option<String>,
    /// Headers in the order they are attached
    pub headers: Vec<(&'static str, String)>,
}

impl PreparedRequest {
    /// Look up a header value by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether authentication headers are attached
    pub fn is_signed(&self) -> bool {
        self.header(HEADER_SIGN).is_some()
    }
}

/// Build the `/v2` request path with its query string
///
/// Pairs are emitted as `key=value` joined by `&` in the given order. No
/// percent-encoding is applied. An empty list adds no `?`.
pub fn build_request_path(endpoint: &str, query: &[(&str, String)]) -> String {
    let mut path = format!("{}{}", API_PREFIX, endpoint);
    if !query.is_empty() {
        let query_string = query
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        path.push('?');
        path.push_str(&query_string);
    }
    path
}

/// Build a request, signing it when a signer is given
pub fn build_request<B>(
    base_url: &str,
    method: Method,
    endpoint: &str,
    query: &[(&str, String)],
    body: Option<&B>,
    signer: Option<&RequestSigner<'_>>,
) -> RestResult<PreparedRequest>
where
    B: Serialize + ?Sized,
{
    let request_path = build_request_path(endpoint, query);

    let body = match body {
        Some(body) => canonical_body(body)?,
        None => None,
    };

    let mut headers = Vec::with_capacity(4);
    if let Some(signer) = signer {
        let signature = signer.sign(
            method.as_str(),
            &request_path,
            body.as_deref().unwrap_or_default(),
        )?;
        headers.push((HEADER_KEY, signer.access_id().to_string()));
        headers.push((HEADER_SIGN, signature));
        headers.push((HEADER_TIMESTAMP, signer.timestamp().to_string()));
    }
    headers.push(("Content-Type", CONTENT_TYPE_JSON.to_string()));

    let url = format!("{}{}", base_url.trim_end_matches('/'), request_path);

    Ok(PreparedRequest {
        method,
        request_path,
        url,
        body,
        headers,
    })
}

/// Shared request executor
///
/// Holds the HTTP client and base URL. Credentials are passed per call so
/// endpoint groups decide whether a request is signed.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    http_client: Client,
    base_url: String,
}

impl RequestExecutor {
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request, signing it with a fresh timestamp when credentials are given
    pub fn prepare<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        credentials: Option<&Credentials>,
    ) -> RestResult<PreparedRequest>
    where
        B: Serialize + ?Sized,
    {
        let signer = credentials.map(RequestSigner::new);
        build_request(
            &self.base_url,
            method,
            endpoint,
            query,
            body,
            signer.as_ref(),
        )
    }

    /// Send a request and return the envelope's `data`
    pub async fn send<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        credentials: Option<&Credentials>,
    ) -> RestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let prepared = self.prepare(method, endpoint, query, body, credentials)?;
        let envelope: ApiResponse = self.execute(&prepared).await?;
        Self::log_api_error(&prepared, &envelope);
        envelope.into_typed::<T>()?.into_result()
    }

    /// Send a request to a paginated list endpoint
    pub async fn send_page<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        credentials: Option<&Credentials>,
    ) -> RestResult<Page<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let prepared = self.prepare(method, endpoint, query, body, credentials)?;
        let envelope: ApiResponse = self.execute(&prepared).await?;
        Self::log_api_error(&prepared, &envelope);
        envelope.into_typed::<Vec<T>>()?.into_page()
    }

    /// Send a request and return the whole decoded JSON response
    ///
    /// Non-zero response codes are not turned into errors here.
    pub async fn send_raw<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        credentials: Option<&Credentials>,
    ) -> RestResult<serde_json::Value>
    where
        B: Serialize + ?Sized,
    {
        let prepared = self.prepare(method, endpoint, query, body, credentials)?;
        self.execute(&prepared).await
    }

    /// Issue a prepared request and decode its JSON body
    pub async fn execute<T>(&self, prepared: &PreparedRequest) -> RestResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(
            method = %prepared.method,
            path = %prepared.request_path,
            signed = prepared.is_signed(),
            "Sending request"
        );

        let mut request = self
            .http_client
            .request(prepared.method.clone(), &prepared.url);
        for (name, value) in &prepared.headers {
            request = request.header(*name, value);
        }
        if let Some(body) = &prepared.body {
            request = request.body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms = retry_after_ms(
                response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok()),
            );
            warn!(path = %prepared.request_path, retry_after_ms, "Rate limited");
            return Err(RestError::RateLimited { retry_after_ms });
        }

        let text = response.text().await?;

        match serde_json::from_str(&text) {
            Ok(decoded) => Ok(decoded),
            Err(_) if !status.is_success() => Err(RestError::HttpStatus {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY),
            }),
            Err(e) => Err(RestError::Parse(format!(
                "{} (status {}, {} bytes)",
                e,
                status.as_u16(),
                text.len()
            ))),
        }
    }

    fn log_api_error(prepared: &PreparedRequest, envelope: &ApiResponse) {
        if !envelope.is_success() {
            warn!(
                path = %prepared.request_path,
                code = envelope.code,
                message = %envelope.message,
                "API returned error"
            );
        }
    }
}

/// Convert a `Retry-After` header in seconds to milliseconds
///
/// Missing or non-numeric values fall back to one second.
fn retry_after_ms(header: Option<&str>) -> u64 {
    header
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| secs.saturating_mul(1000))
        .unwrap_or(DEFAULT_RETRY_AFTER_MS)
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct LeverageBody {
        market: &'static str,
        market_type: &'static str,
        margin_mode: &'static str,
        leverage: u32,
    }

    fn creds() -> Credentials {
        Credentials::new("access-id", "secret-key").unwrap()
    }

    #[test]
    fn test_request_path_keeps_insertion_order() {
        let query: QueryParams = vec![
            ("market", "BTCUSDT".to_string()),
            ("price_type", "latest_price".to_string()),
            ("limit", "10".to_string()),
            ("period", "1hour".to_string()),
        ];
        assert_eq!(
            build_request_path("/futures/kline", &query),
            "/v2/futures/kline?market=BTCUSDT&price_type=latest_price&limit=10&period=1hour"
        );
    }

    #[test]
    fn test_request_path_is_not_encoded() {
        let query: QueryParams = vec![("market", "A B/C".to_string())];
        assert_eq!(
            build_request_path("/spot/deals", &query),
            "/v2/spot/deals?market=A B/C"
        );
    }

    #[test]
    fn test_empty_query_has_no_question_mark() {
        assert_eq!(
            build_request_path("/assets/spot/balance", &[]),
            "/v2/assets/spot/balance"
        );
    }

    #[test]
    fn test_signed_get_request() {
        let creds = creds();
        let signer = RequestSigner::with_timestamp(&creds, "1700000000000");
        let query: QueryParams = vec![
            ("market", "BTCUSDT".to_string()),
            ("limit", "5".to_string()),
            ("interval", "0".to_string()),
        ];

        let prepared = build_request(
            BASE_URL,
            Method::GET,
            "/spot/depth",
            &query,
            NO_BODY,
            Some(&signer),
        )
        .unwrap();

        assert_eq!(
            prepared.url,
            "https://api.coinex.com/v2/spot/depth?market=BTCUSDT&limit=5&interval=0"
        );
        assert_eq!(prepared.body, None);
        assert_eq!(prepared.header(HEADER_KEY), Some("access-id"));
        assert_eq!(prepared.header(HEADER_TIMESTAMP), Some("1700000000000"));
        assert_eq!(prepared.header("content-type"), Some(CONTENT_TYPE_JSON));

        let expected = creds
            .sign_payload("GET/v2/spot/depth?market=BTCUSDT&limit=5&interval=01700000000000")
            .unwrap();
        assert_eq!(prepared.header(HEADER_SIGN), Some(expected.as_str()));
    }

    #[test]
    fn test_signed_post_request_signs_sent_body() {
        let creds = creds();
        let signer = RequestSigner::with_timestamp(&creds, "1700000000001");
        let body = LeverageBody {
            market: "BTCUSDT",
            market_type: "FUTURES",
            margin_mode: "cross",
            leverage: 20,
        };

        let prepared = build_request(
            BASE_URL,
            Method::POST,
            "/futures/adjust-position-leverage",
            &[],
            Some(&body),
            Some(&signer),
        )
        .unwrap();

        let sent = prepared.body.clone().unwrap();
        assert_eq!(
            sent,
            r#"{"market": "BTCUSDT", "market_type": "FUTURES", "margin_mode": "cross", "leverage": 20}"#
        );

        let expected = creds
            .sign_payload(&format!(
                "POST/v2/futures/adjust-position-leverage{}1700000000001",
                sent
            ))
            .unwrap();
        assert_eq!(prepared.header(HEADER_SIGN), Some(expected.as_str()));
    }

    #[test]
    fn test_unsigned_request_has_only_content_type() {
        let prepared =
            build_request(BASE_URL, Method::GET, "/ping", &[], NO_BODY, None).unwrap();
        assert!(!prepared.is_signed());
        assert_eq!(prepared.headers.len(), 1);
        assert_eq!(prepared.url, "https://api.coinex.com/v2/ping");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let prepared =
            build_request("http://localhost:8080/", Method::GET, "/time", &[], NO_BODY, None)
                .unwrap();
        assert_eq!(prepared.url, "http://localhost:8080/v2/time");
    }

    #[test]
    fn test_retry_after_header() {
        assert_eq!(retry_after_ms(Some("2")), 2000);
        assert_eq!(retry_after_ms(None), 1000);
        assert_eq!(retry_after_ms(Some("Wed, 21 Oct 2015 07:28:00 GMT")), 1000);
        assert_eq!(retry_after_ms(Some("18446744073709552")), u64::MAX);
        assert_eq!(retry_after_ms(Some(&u64::MAX.to_string())), u64::MAX);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
