//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, FuturesEndpoints, MarketEndpoints, SpotTradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::request::{RequestExecutor, BASE_URL};
use crate::types::{
    Acknowledgement, Candle, ClosePositionRequest, Deal, FundingRate, FuturesBalance,
    LeverageResult, MarginBalance, MarketDepth, Order, OrderRequest, Page, PingResult, Position,
    ServerTime, SpotBalance, Ticker,
};
use coinex_auth::Credentials;
use coinex_types::{CandlePeriod, MarginMode, MarketType, OrderSide, PriceType};
use reqwest::{Client, Method};
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("coinex-rest/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the API host
pub const BASE_URL_ENV: &str = "COINEX_BASE_URL";

/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_ENV: &str = "COINEX_TIMEOUT_SECS";

/// CoinEx REST API client
///
/// Provides access to both public and private endpoints.
///
/// # Example
///
/// ```no_run
/// use coinex_rest::{CoinexRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CoinexRestClient::new()?;
///     let tickers = client.get_market_ticker("BTCUSDT").await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = CoinexRestClient::with_credentials(creds)?;
///     let balances = auth_client.get_balance().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinexRestClient {
    executor: RequestExecutor,
    credentials: Option<Credentials>,
}

impl CoinexRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a client from `COINEX_*` environment variables
    pub fn from_env() -> RestResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        info!(
            base_url = %config.base_url,
            authenticated = config.credentials.is_some(),
            "Created CoinEx REST client"
        );

        Ok(Self {
            executor: RequestExecutor::new(http_client, config.base_url),
            credentials: config.credentials,
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    /// Call any endpoint and get the raw response envelope
    ///
    /// The request is signed when the client holds credentials. Non-zero
    /// response codes are returned as-is rather than turned into errors.
    pub async fn request_raw<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> RestResult<serde_json::Value>
    where
        B: Serialize + ?Sized,
    {
        self.executor
            .send_raw(method, endpoint, query, body, self.credentials.as_ref())
            .await
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.executor, self.credentials.as_ref())
    }

    /// Check connectivity
    pub async fn ping(&self) -> RestResult<PingResult> {
        self.market().ping().await
    }

    /// Get server time
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        self.market().get_server_time().await
    }

    /// Get spot market depth
    ///
    /// # Arguments
    /// * `market` - Market name (e.g., "BTCUSDT")
    /// * `limit` - Number of levels (5, 10, 20 or 50)
    /// * `interval` - Price merge interval (e.g., "0")
    pub async fn get_market_depth(
        &self,
        market: &str,
        limit: u32,
        interval: &str,
    ) -> RestResult<MarketDepth> {
        self.market().get_market_depth(market, limit, interval).await
    }

    /// Get futures market depth
    pub async fn get_market_depth_futures(
        &self,
        market: &str,
        limit: u32,
        interval: &str,
    ) -> RestResult<MarketDepth> {
        self.market()
            .get_market_depth_futures(market, limit, interval)
            .await
    }

    /// Get recent spot deals
    pub async fn get_market_deals(
        &self,
        market: &str,
        limit: Option<u32>,
        last_id: Option<i64>,
    ) -> RestResult<Vec<Deal>> {
        self.market().get_market_deals(market, limit, last_id).await
    }

    /// Get recent futures deals
    pub async fn get_market_deals_futures(
        &self,
        market: &str,
        limit: Option<u32>,
        last_id: Option<i64>,
    ) -> RestResult<Vec<Deal>> {
        self.market()
            .get_market_deals_futures(market, limit, last_id)
            .await
    }

    /// Get spot candlesticks
    pub async fn get_market_candlesticks(
        &self,
        market: &str,
        limit: u32,
        period: CandlePeriod,
    ) -> RestResult<Vec<Candle>> {
        self.market()
            .get_market_candlesticks(market, limit, period)
            .await
    }

    /// Get futures candlesticks
    pub async fn get_market_candlesticks_futures(
        &self,
        market: &str,
        limit: u32,
        period: CandlePeriod,
        price_type: Option<PriceType>,
    ) -> RestResult<Vec<Candle>> {
        self.market()
            .get_market_candlesticks_futures(market, limit, period, price_type)
            .await
    }

    /// Get spot ticker
    pub async fn get_market_ticker(&self, market: &str) -> RestResult<Vec<Ticker>> {
        self.market().get_market_ticker(market).await
    }

    /// Get futures ticker
    pub async fn get_market_information_futures(&self, market: &str) -> RestResult<Vec<Ticker>> {
        self.market().get_market_information_futures(market).await
    }

    /// Get the funding rate of a futures market
    pub async fn get_funding_rate_futures(&self, market: &str) -> RestResult<Vec<FundingRate>> {
        self.market().get_funding_rate_futures(market).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(&self.executor, creds))
    }

    /// Get spot balances
    pub async fn get_balance(&self) -> RestResult<Vec<SpotBalance>> {
        self.account()?.get_balance().await
    }

    /// Get futures balances
    pub async fn get_balance_futures(&self) -> RestResult<Vec<FuturesBalance>> {
        self.account()?.get_balance_futures().await
    }

    /// Get margin balances
    pub async fn get_balance_margin(&self) -> RestResult<Vec<MarginBalance>> {
        self.account()?.get_balance_margin().await
    }

    // ========================================================================
    // Private Spot Trading Endpoints
    // ========================================================================

    /// Get spot/margin trading endpoints (requires credentials)
    pub fn spot(&self) -> RestResult<SpotTradingEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(SpotTradingEndpoints::new(&self.executor, creds))
    }

    /// Place a spot or margin order
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Order> {
        self.spot()?.place_order(order).await
    }

    /// Query a spot order
    pub async fn order_status(&self, market: &str, order_id: i64) -> RestResult<Order> {
        self.spot()?.order_status(market, order_id).await
    }

    /// List unfilled spot orders
    pub async fn get_pending_orders(
        &self,
        market: &str,
        market_type: MarketType,
        side: Option<OrderSide>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> RestResult<Page<Order>> {
        self.spot()?
            .get_pending_orders(market, market_type, side, page, limit)
            .await
    }

    /// Cancel a spot order
    pub async fn cancel_order(
        &self,
        market: &str,
        market_type: MarketType,
        order_id: i64,
    ) -> RestResult<Order> {
        self.spot()?.cancel_order(market, market_type, order_id).await
    }

    /// Cancel all spot orders in a market
    pub async fn cancel_all_orders(
        &self,
        market: &str,
        market_type: MarketType,
        side: Option<OrderSide>,
    ) -> RestResult<Acknowledgement> {
        self.spot()?
            .cancel_all_orders(market, market_type, side)
            .await
    }

    // ========================================================================
    // Private Futures Endpoints
    // ========================================================================

    /// Get futures endpoints (requires credentials)
    pub fn futures(&self) -> RestResult<FuturesEndpoints<'_>> {
        let creds = self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(FuturesEndpoints::new(&self.executor, creds))
    }

    /// Set leverage and margin mode
    pub async fn adjust_position_leverage(
        &self,
        market: &str,
        market_type: MarketType,
        margin_mode: MarginMode,
        leverage: u32,
    ) -> RestResult<LeverageResult> {
        self.futures()?
            .adjust_position_leverage(market, market_type, margin_mode, leverage)
            .await
    }

    /// List open positions
    pub async fn get_current_position(
        &self,
        market: &str,
        market_type: Option<MarketType>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> RestResult<Page<Position>> {
        self.futures()?
            .get_current_position(market, market_type, page, limit)
            .await
    }

    /// Place a futures order
    pub async fn place_order_futures(&self, order: &OrderRequest) -> RestResult<Order> {
        self.futures()?.place_order_futures(order).await
    }

    /// Query a futures order
    pub async fn order_status_futures(&self, market: &str, order_id: i64) -> RestResult<Order> {
        self.futures()?.order_status_futures(market, order_id).await
    }

    /// Close a futures position
    pub async fn close_position_futures(&self, request: &ClosePositionRequest) -> RestResult<Order> {
        self.futures()?.close_position_futures(request).await
    }

    /// List unfilled futures orders
    pub async fn get_pending_orders_futures(
        &self,
        market: &str,
        market_type: MarketType,
        side: Option<OrderSide>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> RestResult<Page<Order>> {
        self.futures()?
            .get_pending_orders_futures(market, market_type, side, page, limit)
            .await
    }

    /// Cancel a futures order
    pub async fn cancel_order_futures(
        &self,
        market: &str,
        market_type: MarketType,
        order_id: i64,
    ) -> RestResult<Order> {
        self.futures()?
            .cancel_order_futures(market, market_type, order_id)
            .await
    }

    /// Cancel all futures orders in a market
    pub async fn cancel_all_orders_futures(
        &self,
        market: &str,
        market_type: MarketType,
        side: Option<OrderSide>,
    ) -> RestResult<Acknowledgement> {
        self.futures()?
            .cancel_all_orders_futures(market, market_type, side)
            .await
    }

    /// Add or remove isolated margin
    pub async fn adjust_position_margin(
        &self,
        market: &str,
        market_type: MarketType,
        amount: Decimal,
    ) -> RestResult<Position> {
        self.futures()?
            .adjust_position_margin(market, market_type, amount)
            .await
    }
}

impl std::fmt::Debug for CoinexRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinexRestClient")
            .field("base_url", &self.executor.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// API host, without the `/v2` prefix
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Load credentials and overrides from the environment
    ///
    /// `COINEX_ACCESS_ID` and `COINEX_SECRET_KEY` are required.
    /// `COINEX_BASE_URL` and `COINEX_TIMEOUT_SECS` are optional.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::new().with_credentials(Credentials::from_env()?);

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                RestError::InvalidParameter(format!(
                    "{} must be whole seconds, got {:?}",
                    TIMEOUT_ENV, timeout
                ))
            })?;
            config = config.with_timeout(secs);
        }

        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("access-id", "secret-key").unwrap()
    }

    #[test]
    fn test_client_without_credentials() {
        let client = CoinexRestClient::new().unwrap();
        assert!(!client.has_credentials());
        assert_eq!(client.base_url(), BASE_URL);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_base_url("http://127.0.0.1:9000")
            .with_timeout(60)
            .with_user_agent("test-agent");

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_auth_required_error() {
        let client = CoinexRestClient::new().unwrap();
        assert!(matches!(client.account(), Err(RestError::AuthRequired)));
        assert!(matches!(client.spot(), Err(RestError::AuthRequired)));
        assert!(matches!(client.futures(), Err(RestError::AuthRequired)));
    }

    #[test]
    fn test_private_groups_with_credentials() {
        let client = CoinexRestClient::with_credentials(creds()).unwrap();
        assert!(client.has_credentials());
        assert!(client.account().is_ok());
        assert!(client.spot().is_ok());
        assert!(client.futures().is_ok());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = CoinexRestClient::with_credentials(creds()).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains("secret-key"));
    }
}
