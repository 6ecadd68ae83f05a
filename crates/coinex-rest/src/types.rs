//! Types for CoinEx REST API requests and responses

use coinex_types::{MarginMode, MarketType, OrderSide, OrderType, PositionSide, StpMode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{RestError, RestResult};

// ============================================================================
// API Response Wrapper
// ============================================================================

/// Standard CoinEx v2 response envelope
///
/// The executor first decodes `data` as raw JSON, because error responses
/// carry `"data": {}` whatever the endpoint's success shape. Only a zero
/// `code` gets converted into a typed envelope via [`ApiResponse::into_typed`].
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    /// 0 on success
    pub code: i64,
    /// Result data (present if successful)
    pub data: Option<T>,
    /// "OK" or an error description
    #[serde(default)]
    pub message: String,
    /// Present on paginated endpoints
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Get the data, returning an error if the API returned a non-zero code
    pub fn into_result(self) -> RestResult<T> {
        if self.code != 0 {
            return Err(RestError::from_api(self.code, self.message));
        }
        self.data
            .ok_or_else(|| RestError::Parse("No data in response".to_string()))
    }
}

impl ApiResponse {
    /// Decode `data` into the endpoint's type
    ///
    /// A non-zero `code` is returned as [`RestError::Api`] without looking at
    /// `data`.
    pub fn into_typed<T: DeserializeOwned>(self) -> RestResult<ApiResponse<T>> {
        if self.code != 0 {
            return Err(RestError::from_api(self.code, self.message));
        }
        let data = self
            .data
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| RestError::Parse(format!("Unexpected data shape: {}", e)))?;
        Ok(ApiResponse {
            code: self.code,
            data,
            message: self.message,
            pagination: self.pagination,
        })
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Get the data together with its pagination block
    pub fn into_page(self) -> RestResult<Page<T>> {
        let pagination = self.pagination.clone();
        let items = self.into_result()?;
        Ok(Page { items, pagination })
    }
}

/// Pagination block of list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// Total number of records, when the endpoint reports it
    #[serde(default)]
    pub total: Option<u64>,
    /// Whether another page exists
    #[serde(default)]
    pub has_next: bool,
}

/// One page of a paginated list
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// Pagination block, if the endpoint returned one
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    /// Whether another page exists
    pub fn has_next(&self) -> bool {
        self.pagination.as_ref().is_some_and(|p| p.has_next)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Empty `data` object returned by fire-and-forget endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledgement {}

fn parse_decimal(s: &str) -> Option<Decimal> {
    s.parse().ok()
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Response of the ping endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PingResult {
    /// "pong"
    pub result: String,
}

/// Server time
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    /// Unix time in milliseconds
    pub timestamp: i64,
}

/// Market depth response
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDepth {
    /// Market name
    pub market: String,
    /// Whether this is a full snapshot
    #[serde(default)]
    pub is_full: bool,
    /// Depth levels
    pub depth: DepthData,
}

/// Depth levels
#[derive(Debug, Clone, Deserialize)]
pub struct DepthData {
    /// Ask levels [price, amount]
    pub asks: Vec<Vec<String>>,
    /// Bid levels [price, amount]
    pub bids: Vec<Vec<String>>,
    /// Last traded price
    #[serde(default)]
    pub last: Option<String>,
    /// Update time (ms)
    #[serde(default)]
    pub updated_at: Option<i64>,
    /// Depth checksum
    #[serde(default)]
    pub checksum: Option<i64>,
}

impl DepthData {
    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().and_then(|level| parse_decimal(level.first()?))
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().and_then(|level| parse_decimal(level.first()?))
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    /// Get the mid price
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.best_ask()? + self.best_bid()?) / Decimal::TWO)
    }
}

/// Public trade
#[derive(Debug, Clone, Deserialize)]
pub struct Deal {
    /// Deal id
    pub deal_id: i64,
    /// Execution time (ms)
    pub created_at: i64,
    /// Taker side
    pub side: OrderSide,
    /// Price
    pub price: String,
    /// Amount
    pub amount: String,
}

impl Deal {
    pub fn price(&self) -> Option<Decimal> {
        parse_decimal(&self.price)
    }

    pub fn amount(&self) -> Option<Decimal> {
        parse_decimal(&self.amount)
    }
}

/// Candlestick
#[derive(Debug, Clone, Deserialize)]
pub struct Candle {
    /// Market name
    pub market: String,
    /// Open time (ms)
    pub created_at: i64,
    pub open: String,
    pub close: String,
    pub high: String,
    pub low: String,
    /// Base currency volume
    pub volume: String,
    /// Quote currency value
    pub value: String,
}

impl Candle {
    /// Close price as a decimal
    pub fn close_price(&self) -> Option<Decimal> {
        parse_decimal(&self.close)
    }

    /// High minus low
    pub fn range(&self) -> Option<Decimal> {
        Some(parse_decimal(&self.high)? - parse_decimal(&self.low)?)
    }
}

/// Ticker for a spot or futures market
///
/// Futures tickers additionally carry index and mark prices.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Market name
    pub market: String,
    /// Last price
    pub last: String,
    pub open: String,
    pub close: String,
    pub high: String,
    pub low: String,
    /// Base currency volume
    pub volume: String,
    /// Quote currency value
    pub value: String,
    /// Taker sell volume
    #[serde(default)]
    pub volume_sell: Option<String>,
    /// Taker buy volume
    #[serde(default)]
    pub volume_buy: Option<String>,
    /// Statistics period in seconds
    #[serde(default)]
    pub period: Option<i64>,
    /// Index price (futures only)
    #[serde(default)]
    pub index_price: Option<String>,
    /// Mark price (futures only)
    #[serde(default)]
    pub mark_price: Option<String>,
    /// Open interest volume (futures only)
    #[serde(default)]
    pub open_interest_volume: Option<String>,
}

impl Ticker {
    /// Get the last trade price
    pub fn last_price(&self) -> Option<Decimal> {
        parse_decimal(&self.last)
    }

    /// Get the mark price, if this is a futures ticker
    pub fn mark_price(&self) -> Option<Decimal> {
        self.mark_price.as_deref().and_then(parse_decimal)
    }

    /// Percentage change from open to last
    pub fn change_percent(&self) -> Option<Decimal> {
        let open = parse_decimal(&self.open)?;
        if open.is_zero() {
            return None;
        }
        Some((self.last_price()? - open) / open * Decimal::ONE_HUNDRED)
    }
}

/// Current funding rate of a futures market
#[derive(Debug, Clone, Deserialize)]
pub struct FundingRate {
    /// Market name
    pub market: String,
    #[serde(default)]
    pub mark_price: Option<String>,
    #[serde(default)]
    pub latest_funding_rate: Option<String>,
    #[serde(default)]
    pub next_funding_rate: Option<String>,
    #[serde(default)]
    pub max_funding_rate: Option<String>,
    #[serde(default)]
    pub min_funding_rate: Option<String>,
    /// Last settlement time (ms)
    #[serde(default)]
    pub latest_funding_time: Option<i64>,
    /// Next settlement time (ms)
    #[serde(default)]
    pub next_funding_time: Option<i64>,
}

impl FundingRate {
    pub fn next_rate(&self) -> Option<Decimal> {
        self.next_funding_rate.as_deref().and_then(parse_decimal)
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Spot balance of one currency
#[derive(Debug, Clone, Deserialize)]
pub struct SpotBalance {
    /// Currency
    pub ccy: String,
    /// Available amount
    pub available: String,
    /// Frozen amount
    pub frozen: String,
}

impl SpotBalance {
    /// Available plus frozen
    pub fn total(&self) -> Option<Decimal> {
        Some(parse_decimal(&self.available)? + parse_decimal(&self.frozen)?)
    }
}

/// Futures balance of one currency
#[derive(Debug, Clone, Deserialize)]
pub struct FuturesBalance {
    /// Currency
    pub ccy: String,
    /// Available amount
    pub available: String,
    /// Frozen amount
    pub frozen: String,
    /// Position margin
    #[serde(default)]
    pub margin: Option<String>,
    /// Transferable amount
    #[serde(default)]
    pub transferrable: Option<String>,
    /// Unrealized PnL
    #[serde(default)]
    pub unrealized_pnl: Option<String>,
}

impl FuturesBalance {
    pub fn available(&self) -> Option<Decimal> {
        parse_decimal(&self.available)
    }
}

/// Base/quote pair of amounts in a margin account
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarginAmounts {
    #[serde(default)]
    pub base_ccy: String,
    #[serde(default)]
    pub quote_ccy: String,
}

/// Margin account balance
#[derive(Debug, Clone, Deserialize)]
pub struct MarginBalance {
    /// Margin account (market) name
    pub margin_account: String,
    /// Base currency
    pub base_ccy: String,
    /// Quote currency
    pub quote_ccy: String,
    /// Available amounts
    #[serde(default)]
    pub available: MarginAmounts,
    /// Frozen amounts
    #[serde(default)]
    pub frozen: MarginAmounts,
    /// Outstanding loans
    #[serde(default)]
    pub repaid: Option<MarginAmounts>,
    /// Accrued interest
    #[serde(default)]
    pub interest: Option<MarginAmounts>,
    /// Risk rate
    #[serde(default, alias = "rik_rate")]
    pub risk_rate: Option<String>,
    /// Liquidation price
    #[serde(default)]
    pub liq_price: Option<String>,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order placement request for spot, margin and futures markets
///
/// Field declaration order is the JSON key order on the wire, which is part
/// of the signed payload.
///
/// # Example
///
/// ```
/// use coinex_rest::OrderRequest;
/// use coinex_types::{MarketType, OrderSide, StpMode};
/// use rust_decimal::Decimal;
///
/// let order = OrderRequest::limit(
///     "BTCUSDT",
///     MarketType::Futures,
///     OrderSide::Buy,
///     Decimal::new(1, 3),
///     Decimal::from(30000),
/// )
/// .with_client_id("grid-1")
/// .with_stp_mode(StpMode::Both);
///
/// assert_eq!(order.client_id.as_deref(), Some("grid-1"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, TypedBuilder)]
pub struct OrderRequest {
    /// Market name (e.g., "BTCUSDT")
    #[builder(setter(into))]
    pub market: String,
    /// Market type
    pub market_type: MarketType,
    /// Order side
    pub side: OrderSide,
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Order amount
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Hide the order from public depth
    #[builder(default)]
    pub is_hide: bool,
    /// Limit price
    #[builder(default, setter(strip_option))]
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    /// User-defined order id
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Self-trade prevention mode
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stp_mode: Option<StpMode>,
}

impl OrderRequest {
    /// Create a limit order
    pub fn limit(
        market: impl Into<String>,
        market_type: MarketType,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            market_type,
            side,
            order_type: OrderType::Limit,
            amount,
            is_hide: false,
            price: Some(price),
            client_id: None,
            stp_mode: None,
        }
    }

    /// Create a market order
    pub fn market(
        market: impl Into<String>,
        market_type: MarketType,
        side: OrderSide,
        amount: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            market_type,
            side,
            order_type: OrderType::Market,
            amount,
            is_hide: false,
            price: None,
            client_id: None,
            stp_mode: None,
        }
    }

    /// Switch to a post-only order
    pub fn maker_only(mut self) -> Self {
        self.order_type = OrderType::MakerOnly;
        self
    }

    /// Hide from public depth
    pub fn hidden(mut self) -> Self {
        self.is_hide = true;
        self
    }

    /// Set the client order id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the self-trade prevention mode
    pub fn with_stp_mode(mut self, stp_mode: StpMode) -> Self {
        self.stp_mode = Some(stp_mode);
        self
    }

    /// Check required fields before sending
    pub fn validate(&self) -> RestResult<()> {
        if self.market.is_empty() {
            return Err(RestError::InvalidParameter("market is empty".to_string()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.order_type.requires_price() && self.price.is_none() {
            return Err(RestError::InvalidParameter(format!(
                "{} order requires a price",
                self.order_type
            )));
        }
        Ok(())
    }
}

/// Request to close (part of) a futures position
///
/// `amount: None` closes the whole position.
#[derive(Debug, Clone, PartialEq, Serialize, TypedBuilder)]
pub struct ClosePositionRequest {
    /// Market name
    #[builder(setter(into))]
    pub market: String,
    /// Market type
    #[builder(default = MarketType::Futures)]
    pub market_type: MarketType,
    /// Order type used for the closing order
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Hide from public depth
    #[builder(default)]
    pub is_hide: bool,
    /// Limit price
    #[builder(default, setter(strip_option))]
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    /// Amount to close
    #[builder(default, setter(strip_option))]
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    /// User-defined order id
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Self-trade prevention mode
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stp_mode: Option<StpMode>,
}

impl ClosePositionRequest {
    /// Close the whole position at market
    pub fn market_close(market: impl Into<String>) -> Self {
        Self::builder()
            .market(market)
            .order_type(OrderType::Market)
            .build()
    }

    /// Close at a limit price
    pub fn limit_close(market: impl Into<String>, price: Decimal) -> Self {
        Self::builder()
            .market(market)
            .order_type(OrderType::Limit)
            .price(price)
            .build()
    }

    /// Close only part of the position
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Check required fields before sending
    pub fn validate(&self) -> RestResult<()> {
        if self.market.is_empty() {
            return Err(RestError::InvalidParameter("market is empty".to_string()));
        }
        if self.order_type.requires_price() && self.price.is_none() {
            return Err(RestError::InvalidParameter(format!(
                "{} close requires a price",
                self.order_type
            )));
        }
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                return Err(RestError::InvalidParameter(format!(
                    "amount must be positive, got {}",
                    amount
                )));
            }
        }
        Ok(())
    }
}

/// Order as reported by placement, status and cancellation endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// Order id
    pub order_id: i64,
    /// Market name
    pub market: String,
    /// Market type
    pub market_type: MarketType,
    /// Order side
    pub side: OrderSide,
    /// Order type as reported by the exchange
    #[serde(rename = "type")]
    pub order_type: String,
    /// Order amount
    pub amount: String,
    /// Order price ("0" for market orders)
    pub price: String,
    #[serde(default)]
    pub unfilled_amount: Option<String>,
    #[serde(default)]
    pub filled_amount: Option<String>,
    #[serde(default)]
    pub filled_value: Option<String>,
    /// User-defined order id
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub fee_ccy: Option<String>,
    #[serde(default)]
    pub maker_fee_rate: Option<String>,
    #[serde(default)]
    pub taker_fee_rate: Option<String>,
    #[serde(default)]
    pub last_filled_amount: Option<String>,
    #[serde(default)]
    pub last_filled_price: Option<String>,
    /// Realized PnL (futures only)
    #[serde(default)]
    pub realized_pnl: Option<String>,
    /// Order status (status endpoint only)
    #[serde(default)]
    pub status: Option<String>,
    /// Creation time (ms)
    pub created_at: i64,
    /// Last update time (ms)
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Order {
    /// Parsed order type, if it is one this client knows
    pub fn order_type(&self) -> Option<OrderType> {
        self.order_type.parse().ok()
    }

    /// Filled fraction in `[0, 1]`
    pub fn fill_ratio(&self) -> Option<Decimal> {
        let amount = parse_decimal(&self.amount)?;
        let filled = parse_decimal(self.filled_amount.as_deref()?)?;
        if amount.is_zero() {
            return None;
        }
        Some(filled / amount)
    }

    /// Whether nothing is left to fill
    pub fn is_filled(&self) -> bool {
        self.unfilled_amount
            .as_deref()
            .and_then(parse_decimal)
            .is_some_and(|left| left.is_zero())
    }
}

/// Open futures position
#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    /// Position id
    pub position_id: i64,
    /// Market name
    pub market: String,
    /// Market type
    pub market_type: MarketType,
    /// Position direction
    pub side: PositionSide,
    /// Margin mode
    pub margin_mode: MarginMode,
    /// Position size
    pub open_interest: String,
    /// Amount available to close
    #[serde(default)]
    pub close_avbl: Option<String>,
    #[serde(default)]
    pub ath_position_amount: Option<String>,
    #[serde(default)]
    pub unrealized_pnl: Option<String>,
    #[serde(default)]
    pub realized_pnl: Option<String>,
    /// Average entry price
    #[serde(default)]
    pub avg_entry_price: Option<String>,
    #[serde(default)]
    pub cml_position_value: Option<String>,
    #[serde(default)]
    pub max_position_value: Option<String>,
    #[serde(default)]
    pub take_profit_price: Option<String>,
    #[serde(default)]
    pub stop_loss_price: Option<String>,
    #[serde(default)]
    pub take_profit_type: Option<String>,
    #[serde(default)]
    pub stop_loss_type: Option<String>,
    /// Leverage
    pub leverage: String,
    #[serde(default)]
    pub margin_avbl: Option<String>,
    #[serde(default)]
    pub ath_margin_size: Option<String>,
    #[serde(default)]
    pub position_margin_rate: Option<String>,
    #[serde(default)]
    pub maintenance_margin_rate: Option<String>,
    #[serde(default)]
    pub maintenance_margin_value: Option<String>,
    /// Liquidation price
    #[serde(default)]
    pub liq_price: Option<String>,
    /// Bankruptcy price
    #[serde(default)]
    pub bkr_price: Option<String>,
    /// Auto-deleveraging level
    #[serde(default)]
    pub adl_level: Option<i64>,
    #[serde(default)]
    pub settle_price: Option<String>,
    #[serde(default)]
    pub settle_value: Option<String>,
    /// Creation time (ms)
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Last update time (ms)
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Position {
    /// Position size as a decimal
    pub fn size(&self) -> Option<Decimal> {
        parse_decimal(&self.open_interest)
    }

    pub fn unrealized_pnl(&self) -> Option<Decimal> {
        self.unrealized_pnl.as_deref().and_then(parse_decimal)
    }

    pub fn liquidation_price(&self) -> Option<Decimal> {
        self.liq_price.as_deref().and_then(parse_decimal)
    }
}

/// Result of a leverage adjustment
#[derive(Debug, Clone, Deserialize)]
pub struct LeverageResult {
    /// Margin mode now in effect
    pub margin_mode: MarginMode,
    /// Leverage now in effect
    pub leverage: u32,
}
