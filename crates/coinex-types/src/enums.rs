//! Market type, side, order type, margin mode and candle period enums
//!
//! Every enum serializes to the exact string CoinEx expects on the wire and
//! implements `Display` with the same text, so it can be dropped straight
//! into a query string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Trading venue classification used as a routing parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketType {
    /// Spot market
    Spot,
    /// Margin market
    Margin,
    /// Perpetual futures market
    Futures,
}

impl MarketType {
    /// Returns the market type as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "SPOT",
            Self::Margin => "MARGIN",
            Self::Futures => "FUTURES",
        }
    }

    /// Returns true for markets served by the spot order endpoints
    pub fn is_spot_venue(&self) -> bool {
        matches!(self, Self::Spot | Self::Margin)
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SPOT" => Ok(Self::Spot),
            "MARGIN" => Ok(Self::Margin),
            "FUTURES" => Ok(Self::Futures),
            _ => Err(TypesError::unknown("market type", s)),
        }
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(TypesError::unknown("order side", s)),
        }
    }
}

/// Direction of an open futures position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }

    /// Order side that reduces this position
    pub fn closing_side(&self) -> OrderSide {
        match self {
            Self::Long => OrderSide::Sell,
            Self::Short => OrderSide::Buy,
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order types accepted by the order placement endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
    /// Post-only limit order
    MakerOnly,
    /// Immediate-or-cancel
    Ioc,
    /// Fill-or-kill
    Fok,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
            Self::MakerOnly => "maker_only",
            Self::Ioc => "ioc",
            Self::Fok => "fok",
        }
    }

    /// Returns true if orders of this type must carry a price
    pub fn requires_price(&self) -> bool {
        !matches!(self, Self::Market)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "limit" => Ok(Self::Limit),
            "market" => Ok(Self::Market),
            "maker_only" => Ok(Self::MakerOnly),
            "ioc" => Ok(Self::Ioc),
            "fok" => Ok(Self::Fok),
            _ => Err(TypesError::unknown("order type", s)),
        }
    }
}

/// Position margin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    /// Cross margin
    Cross,
    /// Isolated margin
    Isolated,
}

impl MarginMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cross => "cross",
            Self::Isolated => "isolated",
        }
    }
}

impl fmt::Display for MarginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-trade prevention mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StpMode {
    /// Cancel the taker order
    Ct,
    /// Cancel the maker order
    Cm,
    /// Cancel both sides
    Both,
}

impl StpMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ct => "ct",
            Self::Cm => "cm",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for StpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candlestick period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandlePeriod {
    #[serde(rename = "1min")]
    Min1,
    #[serde(rename = "3min")]
    Min3,
    #[serde(rename = "5min")]
    Min5,
    #[serde(rename = "15min")]
    Min15,
    #[serde(rename = "30min")]
    Min30,
    #[serde(rename = "1hour")]
    Hour1,
    #[serde(rename = "2hour")]
    Hour2,
    #[serde(rename = "4hour")]
    Hour4,
    #[serde(rename = "6hour")]
    Hour6,
    #[serde(rename = "12hour")]
    Hour12,
    #[serde(rename = "1day")]
    Day1,
    #[serde(rename = "3day")]
    Day3,
    #[serde(rename = "1week")]
    Week1,
}

impl CandlePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min3 => "3min",
            Self::Min5 => "5min",
            Self::Min15 => "15min",
            Self::Min30 => "30min",
            Self::Hour1 => "1hour",
            Self::Hour2 => "2hour",
            Self::Hour4 => "4hour",
            Self::Hour6 => "6hour",
            Self::Hour12 => "12hour",
            Self::Day1 => "1day",
            Self::Day3 => "3day",
            Self::Week1 => "1week",
        }
    }

    /// Length of one candle in seconds
    pub fn as_secs(&self) -> u64 {
        const MIN: u64 = 60;
        const HOUR: u64 = 60 * MIN;
        const DAY: u64 = 24 * HOUR;
        match self {
            Self::Min1 => MIN,
            Self::Min3 => 3 * MIN,
            Self::Min5 => 5 * MIN,
            Self::Min15 => 15 * MIN,
            Self::Min30 => 30 * MIN,
            Self::Hour1 => HOUR,
            Self::Hour2 => 2 * HOUR,
            Self::Hour4 => 4 * HOUR,
            Self::Hour6 => 6 * HOUR,
            Self::Hour12 => 12 * HOUR,
            Self::Day1 => DAY,
            Self::Day3 => 3 * DAY,
            Self::Week1 => 7 * DAY,
        }
    }
}

impl fmt::Display for CandlePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandlePeriod {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "1min" => Self::Min1,
            "3min" => Self::Min3,
            "5min" => Self::Min5,
            "15min" => Self::Min15,
            "30min" => Self::Min30,
            "1hour" => Self::Hour1,
            "2hour" => Self::Hour2,
            "4hour" => Self::Hour4,
            "6hour" => Self::Hour6,
            "12hour" => Self::Hour12,
            "1day" => Self::Day1,
            "3day" => Self::Day3,
            "1week" => Self::Week1,
            _ => return Err(TypesError::unknown("candle period", s)),
        })
    }
}

/// Price source for futures candlesticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    /// Last traded price
    #[default]
    LatestPrice,
    /// Mark price
    MarkPrice,
    /// Index price
    IndexPrice,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LatestPrice => "latest_price",
            Self::MarkPrice => "mark_price",
            Self::IndexPrice => "index_price",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_type_serde() {
        assert_eq!(serde_json::to_string(&MarketType::Futures).unwrap(), "\"FUTURES\"");
        assert_eq!(serde_json::to_string(&MarketType::Margin).unwrap(), "\"MARGIN\"");

        let parsed: MarketType = serde_json::from_str("\"SPOT\"").unwrap();
        assert_eq!(parsed, MarketType::Spot);
    }

    #[test]
    fn test_display_matches_wire() {
        assert_eq!(MarketType::Spot.to_string(), "SPOT");
        assert_eq!(OrderType::MakerOnly.to_string(), "maker_only");
        assert_eq!(
            serde_json::to_string(&OrderType::MakerOnly).unwrap(),
            "\"maker_only\""
        );
        assert_eq!(CandlePeriod::Hour4.to_string(), "4hour");
        assert_eq!(
            serde_json::to_string(&CandlePeriod::Week1).unwrap(),
            "\"1week\""
        );
        assert_eq!(PriceType::default().to_string(), "latest_price");
        assert_eq!(StpMode::Both.to_string(), "both");
        assert_eq!(MarginMode::Isolated.to_string(), "isolated");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("futures".parse::<MarketType>().unwrap(), MarketType::Futures);
        assert_eq!("1day".parse::<CandlePeriod>().unwrap(), CandlePeriod::Day1);
        assert_eq!("ioc".parse::<OrderType>().unwrap(), OrderType::Ioc);
        assert!("2min".parse::<CandlePeriod>().is_err());
        assert!("hold".parse::<OrderSide>().is_err());
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn test_position_closing_side() {
        assert_eq!(PositionSide::Long.closing_side(), OrderSide::Sell);
        let parsed: PositionSide = serde_json::from_str("\"short\"").unwrap();
        assert_eq!(parsed.closing_side(), OrderSide::Buy);
    }

    #[test]
    fn test_candle_period_secs() {
        assert_eq!(CandlePeriod::Min15.as_secs(), 900);
        assert_eq!(CandlePeriod::Week1.as_secs(), 604_800);
    }

    #[test]
    fn test_order_type_price_requirement() {
        assert!(OrderType::Limit.requires_price());
        assert!(!OrderType::Market.requires_price());
    }
}
