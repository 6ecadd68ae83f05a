//! Public market data endpoints
//!
//! These endpoints don't require authentication. When the client holds
//! credentials the requests are signed anyway.

use coinex_auth::Credentials;
use coinex_types::{CandlePeriod, PriceType};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{RestError, RestResult};
use crate::request::{QueryParams, RequestExecutor, NO_BODY};
use crate::types::{Candle, Deal, FundingRate, MarketDepth, PingResult, ServerTime, Ticker};

/// Depth levels accepted by the depth endpoints
pub const DEPTH_LIMITS: [u32; 4] = [5, 10, 20, 50];

/// Default number of deals per request
pub const DEFAULT_DEALS_LIMIT: u32 = 100;

/// Largest page the deals and kline endpoints return
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    executor: &'a RequestExecutor,
    credentials: Option<&'a Credentials>,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor, credentials: Option<&'a Credentials>) -> Self {
        Self {
            executor,
            credentials,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> RestResult<T> {
        self.executor
            .send(Method::GET, endpoint, query, NO_BODY, self.credentials)
            .await
    }

    /// Check connectivity
    #[instrument(skip(self))]
    pub async fn ping(&self) -> RestResult<PingResult> {
        self.get("/ping", &[]).await
    }

    /// Get server time
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        self.get("/time", &[]).await
    }

    /// Get spot market depth
    ///
    /// # Arguments
    /// * `market` - Market name (e.g., "BTCUSDT")
    /// * `limit` - Number of levels (5, 10, 20 or 50)
    /// * `interval` - Price merge interval (e.g., "0", "0.01")
    #[instrument(skip(self))]
    pub async fn get_market_depth(
        &self,
        market: &str,
        limit: u32,
        interval: &str,
    ) -> RestResult<MarketDepth> {
        let query = depth_query(market, limit, interval)?;
        debug!("Fetching spot depth for {}", market);
        self.get("/spot/depth", &query).await
    }

    /// Get futures market depth
    ///
    /// Same parameters as [`get_market_depth`](Self::get_market_depth).
    #[instrument(skip(self))]
    pub async fn get_market_depth_futures(
        &self,
        market: &str,
        limit: u32,
        interval: &str,
    ) -> RestResult<MarketDepth> {
        let query = depth_query(market, limit, interval)?;
        debug!("Fetching futures depth for {}", market);
        self.get("/futures/depth", &query).await
    }

    /// Get recent spot deals
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `limit` - Number of deals (default 100, 1 to 1000)
    /// * `last_id` - Return deals after this id (default 0, latest)
    #[instrument(skip(self))]
    pub async fn get_market_deals(
        &self,
        market: &str,
        limit: Option<u32>,
        last_id: Option<i64>,
    ) -> RestResult<Vec<Deal>> {
        let query = deals_query(market, limit, last_id)?;
        self.get("/spot/deals", &query).await
    }

    /// Get recent futures deals
    #[instrument(skip(self))]
    pub async fn get_market_deals_futures(
        &self,
        market: &str,
        limit: Option<u32>,
        last_id: Option<i64>,
    ) -> RestResult<Vec<Deal>> {
        let query = deals_query(market, limit, last_id)?;
        self.get("/futures/deals", &query).await
    }

    /// Get spot candlesticks
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `limit` - Number of candles (1 to 1000)
    /// * `period` - Candle period
    #[instrument(skip(self))]
    pub async fn get_market_candlesticks(
        &self,
        market: &str,
        limit: u32,
        period: CandlePeriod,
    ) -> RestResult<Vec<Candle>> {
        let query: QueryParams = vec![
            ("market", market.to_string()),
            ("limit", list_limit(limit)?.to_string()),
            ("period", period.to_string()),
        ];
        self.get("/spot/kline", &query).await
    }

    /// Get futures candlesticks
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `limit` - Number of candles (1 to 1000)
    /// * `period` - Candle period
    /// * `price_type` - Price source (default latest price)
    #[instrument(skip(self))]
    pub async fn get_market_candlesticks_futures(
        &self,
        market: &str,
        limit: u32,
        period: CandlePeriod,
        price_type: Option<PriceType>,
    ) -> RestResult<Vec<Candle>> {
        let query: QueryParams = vec![
            ("market", market.to_string()),
            ("price_type", price_type.unwrap_or_default().to_string()),
            ("limit", list_limit(limit)?.to_string()),
            ("period", period.to_string()),
        ];
        self.get("/futures/kline", &query).await
    }

    /// Get spot ticker
    #[instrument(skip(self))]
    pub async fn get_market_ticker(&self, market: &str) -> RestResult<Vec<Ticker>> {
        let query: QueryParams = vec![("market", market.to_string())];
        self.get("/spot/ticker", &query).await
    }

    /// Get futures ticker, including index and mark prices
    #[instrument(skip(self))]
    pub async fn get_market_information_futures(&self, market: &str) -> RestResult<Vec<Ticker>> {
        let query: QueryParams = vec![("market", market.to_string())];
        self.get("/futures/ticker", &query).await
    }

    /// Get the current funding rate of a futures market
    #[instrument(skip(self))]
    pub async fn get_funding_rate_futures(&self, market: &str) -> RestResult<Vec<FundingRate>> {
        let query: QueryParams = vec![("market", market.to_string())];
        self.get("/futures/funding-rate", &query).await
    }
}

fn depth_query<'q>(market: &str, limit: u32, interval: &str) -> RestResult<QueryParams<'q>> {
    if !DEPTH_LIMITS.contains(&limit) {
        return Err(RestError::InvalidParameter(format!(
            "depth limit must be one of {:?}, got {}",
            DEPTH_LIMITS, limit
        )));
    }
    Ok(vec![
        ("market", market.to_string()),
        ("limit", limit.to_string()),
        ("interval", interval.to_string()),
    ])
}

fn deals_query<'q>(
    market: &str,
    limit: Option<u32>,
    last_id: Option<i64>,
) -> RestResult<QueryParams<'q>> {
    Ok(vec![
        ("market", market.to_string()),
        (
            "limit",
            list_limit(limit.unwrap_or(DEFAULT_DEALS_LIMIT))?.to_string(),
        ),
        ("last_id", last_id.unwrap_or(0).to_string()),
    ])
}

fn list_limit(limit: u32) -> RestResult<u32> {
    if limit == 0 || limit > MAX_LIST_LIMIT {
        return Err(RestError::InvalidParameter(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LIST_LIMIT, limit
        )));
    }
    Ok(limit)
}
