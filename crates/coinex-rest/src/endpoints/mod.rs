//! REST API endpoint implementations
//!
//! Endpoints are organized into categories:
//! - [`market`]: Public market data (no auth required)
//! - [`account`]: Account balances (auth required)
//! - [`spot`]: Spot and margin order management (auth required)
//! - [`futures`]: Futures orders and positions (auth required)

pub mod account;
pub mod futures;
pub mod market;
pub mod spot;

pub use account::AccountEndpoints;
pub use futures::FuturesEndpoints;
pub use market::MarketEndpoints;
pub use spot::SpotTradingEndpoints;

use coinex_types::{MarketType, OrderSide};
use serde::Serialize;

use crate::request::QueryParams;

/// Default page size of the pending order endpoints
pub const DEFAULT_PENDING_LIMIT: u32 = 10;

/// Body of the single order cancel endpoints
#[derive(Debug, Serialize)]
pub(crate) struct CancelOrderBody<'a> {
    pub market: &'a str,
    pub market_type: MarketType,
    pub order_id: i64,
}

/// Body of the cancel-all endpoints
#[derive(Debug, Serialize)]
pub(crate) struct CancelAllBody<'a> {
    pub market: &'a str,
    pub market_type: MarketType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<OrderSide>,
}

pub(crate) fn order_status_query<'q>(market: &str, order_id: i64) -> QueryParams<'q> {
    vec![
        ("market", market.to_string()),
        ("order_id", order_id.to_string()),
    ]
}

pub(crate) fn pending_orders_query<'q>(
    market: &str,
    market_type: MarketType,
    side: Option<OrderSide>,
    page: Option<u32>,
    limit: Option<u32>,
) -> QueryParams<'q> {
    let mut query: QueryParams = vec![
        ("market", market.to_string()),
        ("market_type", market_type.to_string()),
    ];
    if let Some(side) = side {
        query.push(("side", side.to_string()));
    }
    query.push(("page", page.unwrap_or(1).to_string()));
    query.push(("limit", limit.unwrap_or(DEFAULT_PENDING_LIMIT).to_string()));
    query
}
