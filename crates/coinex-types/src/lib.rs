//! Shared types for the CoinEx REST API v2
//!
//! This crate provides the core type definitions used across the CoinEx SDK.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`MarketType`], [`OrderSide`], [`OrderType`], [`MarginMode`], [`StpMode`] - Request enums
//! - [`CandlePeriod`], [`PriceType`] - Market data parameters
//! - [`CoinexApiError`], [`CoinexErrorCode`] - Response code mapping with recovery strategies
//! - [`timestamp_to_strdatetime`] - Timestamp rendering

pub mod enums;
pub mod error;
pub mod error_codes;
pub mod time;

pub use enums::*;
pub use error::*;
pub use error_codes::*;
pub use time::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
