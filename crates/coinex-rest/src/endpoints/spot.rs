//! Spot and margin order endpoints (require authentication)

use coinex_auth::Credentials;
use coinex_types::{MarketType, OrderSide};
use reqwest::Method;
use tracing::{debug, instrument};

use super::{order_status_query, pending_orders_query, CancelAllBody, CancelOrderBody};
use crate::error::{RestError, RestResult};
use crate::request::{RequestExecutor, NO_BODY};
use crate::types::{Acknowledgement, Order, OrderRequest, Page};

/// Private spot/margin trading endpoints
pub struct SpotTradingEndpoints<'a> {
    executor: &'a RequestExecutor,
    credentials: &'a Credentials,
}

impl<'a> SpotTradingEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor, credentials: &'a Credentials) -> Self {
        Self {
            executor,
            credentials,
        }
    }

    /// Place a spot or margin order
    ///
    /// # Example
    ///
    /// ```no_run
    /// use coinex_rest::{CoinexRestClient, OrderRequest};
    /// use coinex_types::{MarketType, OrderSide};
    /// use rust_decimal::Decimal;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = CoinexRestClient::from_env()?;
    /// let order = OrderRequest::limit(
    ///     "BTCUSDT",
    ///     MarketType::Spot,
    ///     OrderSide::Buy,
    ///     Decimal::new(1, 3),
    ///     Decimal::from(30000),
    /// );
    /// let placed = client.place_order(&order).await?;
    /// println!("Order id: {}", placed.order_id);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side))]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Order> {
        if !order.market_type.is_spot_venue() {
            return Err(RestError::InvalidParameter(format!(
                "{} order sent to the spot endpoint",
                order.market_type
            )));
        }
        order.validate()?;
        debug!("Placing {} {} order", order.order_type, order.side);

        self.executor
            .send(Method::POST, "/spot/order", &[], Some(order), Some(self.credentials))
            .await
    }

    /// Query an order by id
    #[instrument(skip(self))]
    pub async fn order_status(&self, market: &str, order_id: i64) -> RestResult<Order> {
        let query = order_status_query(market, order_id);
        self.executor
            .send(Method::GET, "/spot/order-status", &query, NO_BODY, Some(self.credentials))
            .await
    }

    /// List unfilled orders
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `market_type` - `Spot` or `Margin`
    /// * `side` - Only orders on this side
    /// * `page` - Page number (default 1)
    /// * `limit` - Page size (default 10)
    #[instrument(skip(self))]
    pub async fn get_pending_orders(
        &self,
        market: &str,
        market_type: MarketType,
        side: Option<OrderSide>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> RestResult<Page<Order>> {
        let query = pending_orders_query(market, market_type, side, page, limit);
        self.executor
            .send_page(Method::GET, "/spot/pending-order", &query, NO_BODY, Some(self.credentials))
            .await
    }

    /// Cancel one order
    #[instrument(skip(self))]
    pub async fn cancel_order(
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
            .send(Method::POST, "/spot/cancel-order", &[], Some(&body), Some(self.credentials))
            .await
    }

    /// Cancel every open order in a market, optionally only one side
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(
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
                "/spot/cancel-all-order",
                &[],
                Some(&body),
                Some(self.credentials),
            )
            .await
    }
}
