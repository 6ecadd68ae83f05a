//! Futures order and position endpoints (require authentication)

use coinex_auth::Credentials;
use coinex_types::{MarginMode, MarketType, OrderSide};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{order_status_query, pending_orders_query, CancelAllBody, CancelOrderBody};
use crate::error::{RestError, RestResult};
use crate::request::{QueryParams, RequestExecutor, NO_BODY};
use crate::types::{
    Acknowledgement, ClosePositionRequest, LeverageResult, Order, OrderRequest, Page, Position,
};

/// Default page size of the position listing
pub const DEFAULT_POSITION_LIMIT: u32 = 100;

#[derive(Debug, Serialize)]
struct LeverageBody<'a> {
    market: &'a str,
    market_type: MarketType,
    margin_mode: MarginMode,
    leverage: u32,
}

#[derive(Debug, Serialize)]
struct MarginBody<'a> {
    market: &'a str,
    market_type: MarketType,
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
}

/// Private futures endpoints
pub struct FuturesEndpoints<'a> {
    executor: &'a RequestExecutor,
    credentials: &'a Credentials,
}

impl<'a> FuturesEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor, credentials: &'a Credentials) -> Self {
        Self {
            executor,
            credentials,
        }
    }

    /// Set the leverage and margin mode of a market
    #[instrument(skip(self))]
    pub async fn adjust_position_leverage(
        &self,
        market: &str,
        market_type: MarketType,
        margin_mode: MarginMode,
        leverage: u32,
    ) -> RestResult<LeverageResult> {
        if leverage == 0 {
            return Err(RestError::InvalidParameter(
                "leverage must be at least 1".to_string(),
            ));
        }
        let body = LeverageBody {
            market,
            market_type,
            margin_mode,
            leverage,
        };
        self.executor
            .send(
                Method::POST,
                "/futures/adjust-position-leverage",
                &[],
                Some(&body),
                Some(self.credentials),
            )
            .await
    }

    /// List open positions
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `market_type` - Defaults to `Futures`
    /// * `page` - Page number (default 1)
    /// * `limit` - Page size (default 100)
    #[instrument(skip(self))]
    pub async fn get_current_position(
        &self,
        market: &str,
        market_type: Option<MarketType>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> RestResult<Page<Position>> {
        let query: QueryParams = vec![
            ("market", market.to_string()),
            (
                "market_type",
                market_type.unwrap_or(MarketType::Futures).to_string(),
            ),
            ("page", page.unwrap_or(1).to_string()),
            ("limit", limit.unwrap_or(DEFAULT_POSITION_LIMIT).to_string()),
        ];
        self.executor
            .send_page(
                Method::GET,
                "/futures/pending-position",
                &query,
                NO_BODY,
                Some(self.credentials),
            )
            .await
    }

    /// Place a futures order
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side))]
    pub async fn place_order_futures(&self, order: &OrderRequest) -> RestResult<Order> {
        if order.market_type != MarketType::Futures {
            return Err(RestError::InvalidParameter(format!(
                "{} order sent to the futures endpoint",
                order.market_type
            )));
        }
        order.validate()?;
        debug!("Placing {} {} futures order", order.order_type, order.side);

        self.executor
            .send(Method::POST, "/futures/order", &[], Some(order), Some(self.credentials))
            .await
    }

    /// Query a futures order by id
    #[instrument(skip(self))]
    pub async fn order_status_futures(&self, market: &str, order_id: i64) -> RestResult<Order> {
        let query = order_status_query(market, order_id);
        self.executor
            .send(
                Method::GET,
                "/futures/order-status",
                &query,
                NO_BODY,
                Some(self.credentials),
            )
            .await
    }

    /// Close a position, fully or partially
    #[instrument(skip(self, request), fields(market = %request.market))]
    pub async fn close_position_futures(&self, request: &ClosePositionRequest) -> RestResult<Order> {
        request.validate()?;
        self.executor
            .send(
                Method::POST,
                "/futures/close-position",
                &[],
                Some(request),
                Some(self.credentials),
            )
            .await
    }

    /// List unfilled futures orders
    #[instrument(skip(self))]
    pub async fn get_pending_orders_futures(
        &self,
        market: &str,
        market_type: MarketType,
        side: Option<OrderSide>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> RestResult<Page<Order>> {
        let query = pending_orders_query(market, market_type, side, page, limit);
        self.executor
            .send_page(
                Method::GET,
                "/futures/pending-order",
                &query,
                NO_BODY,
                Some(self.credentials),
            )
            .await
    }

    /// Cancel one futures order
    #[instrument(skip(self))]
    pub async fn cancel_order_futures(
        &self,
        market: &str,
        market_type: MarketType,
        order_id: i64,
    ) -> RestResult<Order> {
        let body = CancelOrderBody {
            market,
            market_type,
            order_id,
        };
        self.executor
            .send(
                Method::POST,
                "/futures/cancel-order",
                &[],
                Some(&body),
                Some(self.credentials),
            )
            .await
    }

    /// Cancel every open futures order in a market
    #[instrument(skip(self))]
    pub async fn cancel_all_orders_futures(
        &self,
        market: &str,
        market_type: MarketType,
        side: Option<OrderSide>,
    ) -> RestResult<Acknowledgement> {
        let body = CancelAllBody {
            market,
            market_type,
            side,
        };
        self.executor
            .send(
                Method::POST,
                "/futures/cancel-all-order",
                &[],
                Some(&body),
                Some(self.credentials),
            )
            .await
    }

    /// Add margin to (positive amount) or remove margin from (negative amount)
    /// an isolated position
    #[instrument(skip(self))]
    pub async fn adjust_position_margin(
        &self,
        market: &str,
        market_type: MarketType,
        amount: Decimal,
    ) -> RestResult<Position> {
        if amount.is_zero() {
            return Err(RestError::InvalidParameter(
                "margin adjustment must be non-zero".to_string(),
            ));
        }
        let body = MarginBody {
            market,
            market_type,
            amount,
        };
        self.executor
            .send(
                Method::POST,
                "/futures/adjust-position-margin",
                &[],
                Some(&body),
                Some(self.credentials),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinex_auth::to_canonical_json;
    use rust_decimal_macros::dec;

    #[test]
    fn test_leverage_body_order() {
        let body = LeverageBody {
            market: "BTCUSDT",
            market_type: MarketType::Futures,
            margin_mode: MarginMode::Isolated,
            leverage: 10,
        };
        assert_eq!(
            to_canonical_json(&body).unwrap(),
            r#"{"market": "BTCUSDT", "market_type": "FUTURES", "margin_mode": "isolated", "leverage": 10}"#
        );
    }

    #[test]
    fn test_margin_body_amount_is_string() {
        let body = MarginBody {
            market: "BTCUSDT",
            market_type: MarketType::Futures,
            amount: dec!(-12.5),
        };
        assert_eq!(
            to_canonical_json(&body).unwrap(),
            r#"{"market": "BTCUSDT", "market_type": "FUTURES", "amount": "-12.5"}"#
        );
    }
}
