//! REST API client for the CoinEx cryptocurrency exchange
//!
//! This crate provides a v2 REST client covering market data, balances,
//! spot/margin orders and futures positions.
//!
//! # Features
//!
//! - **Market Data**: Depth, deals, candlesticks, tickers, funding rates
//! - **Account**: Spot, futures and margin balances
//! - **Spot Trading**: Place, query, list and cancel orders
//! - **Futures**: Orders, positions, leverage and margin adjustments
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA256 over `METHOD + path?query + body + timestamp`, and the JSON
//! body that gets signed is byte-for-byte the body that gets sent.
//! Public endpoints are signed too whenever the client holds credentials.
//!
//! # Example
//!
//! ```no_run
//! use coinex_rest::{CoinexRestClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CoinexRestClient::new()?;
//!     let depth = client.get_market_depth("BTCUSDT", 5, "0").await?;
//!     println!("BTC/USDT best bid: {:?}", depth.depth.best_bid());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = CoinexRestClient::with_credentials(creds)?;
//!     let balances = auth_client.get_balance().await?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! A non-zero `code` in the response envelope becomes [`RestError::Api`],
//! which carries the parsed [`CoinexApiError`]. No retries are performed;
//! [`RestError::recovery_strategy`] tells callers what a retry would need.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CoinexRestClient};
pub use coinex_auth::Credentials;
pub use coinex_types::CoinexApiError;
pub use error::{RestError, RestResult};
pub use request::{build_request, build_request_path, PreparedRequest, RequestExecutor};

// Re-export endpoint-specific types
pub use types::{
    // Envelope
    Acknowledgement, ApiResponse, Page, Pagination,
    // Market data
    Candle, Deal, DepthData, FundingRate, MarketDepth, PingResult, ServerTime, Ticker,
    // Account
    FuturesBalance, MarginAmounts, MarginBalance, SpotBalance,
    // Trading
    ClosePositionRequest, LeverageResult, Order, OrderRequest, Position,
};
