//! Account balance endpoints (require authentication)

use coinex_auth::Credentials;
use reqwest::Method;
use tracing::instrument;

use crate::error::RestResult;
use crate::request::{RequestExecutor, NO_BODY};
use crate::types::{FuturesBalance, MarginBalance, SpotBalance};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    executor: &'a RequestExecutor,
    credentials: &'a Credentials,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(executor: &'a RequestExecutor, credentials: &'a Credentials) -> Self {
        Self {
            executor,
            credentials,
        }
    }

    /// Get spot account balances
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> RestResult<Vec<SpotBalance>> {
        self.executor
            .send(Method::GET, "/assets/spot/balance", &[], NO_BODY, Some(self.credentials))
            .await
    }

    /// Get futures account balances
    #[instrument(skip(self))]
    pub async fn get_balance_futures(&self) -> RestResult<Vec<FuturesBalance>> {
        self.executor
            .send(
                Method::GET,
                "/assets/futures/balance",
                &[],
                NO_BODY,
                Some(self.credentials),
            )
            .await
    }

    /// Get margin account balances, one entry per market
    #[instrument(skip(self))]
    pub async fn get_balance_margin(&self) -> RestResult<Vec<MarginBalance>> {
        self.executor
            .send(
                Method::GET,
                "/assets/margin/balance",
                &[],
                NO_BODY,
                Some(self.credentials),
            )
            .await
    }
}
