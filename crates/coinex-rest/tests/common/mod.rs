//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the CoinEx v2 REST documentation.

#![allow(dead_code)]

use coinex_rest::{ClientConfig, CoinexRestClient, Credentials};
use wiremock::{MockServer, Request};

pub const ACCESS_ID: &str = "4DA36FFC61334695A66F8D29020EB589";
pub const SECRET_KEY: &str = "9B5F4D5E1A6C4C3A8B2E7F9D0C1B2A3E4F5D6C7B8A9E0F1D";

pub const PING_RESPONSE: &str = r#"{"code": 0, "data": {"result": "pong"}, "message": "OK"}"#;

pub const DEPTH_RESPONSE: &str = r#"{
    "code": 0,
    "data": {
        "market": "BTCUSDT",
        "is_full": true,
        "depth": {
            "asks": [["30740.00", "0.31763545"], ["30769.00", "1.45155000"]],
            "bids": [["30736.00", "0.04857373"], ["30733.00", "0.84696320"]],
            "last": "30746.28",
            "updated_at": 1689152421692,
            "checksum": 2578768879
        }
    },
    "message": "OK"
}"#;

pub const DEALS_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {"deal_id": 3514376759, "created_at": 1689152421692, "side": "buy", "price": "30718.42", "amount": "0.00000325"},
        {"deal_id": 3514376758, "created_at": 1689152421692, "side": "sell", "price": "30718.42", "amount": "0.00015729"}
    ],
    "message": "OK"
}"#;

pub const KLINE_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {
            "market": "BTCUSDT",
            "created_at": 1701763200000,
            "open": "0.0001",
            "close": "0.0001",
            "high": "0.0001",
            "low": "0.0001",
            "volume": "0",
            "value": "0"
        }
    ],
    "message": "OK"
}"#;

pub const FUTURES_TICKER_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {
            "market": "BTCUSDT",
            "last": "30000.00",
            "open": "29000.00",
            "close": "30000.00",
            "high": "30500.00",
            "low": "28800.00",
            "volume": "120.5",
            "value": "3600000",
            "volume_sell": "60.1",
            "volume_buy": "60.4",
            "period": 86400,
            "index_price": "29995.12",
            "mark_price": "29998.50",
            "open_interest_volume": "250.0"
        }
    ],
    "message": "OK"
}"#;

pub const SPOT_BALANCE_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {"ccy": "USDT", "available": "1000.50", "frozen": "20.00"},
        {"ccy": "BTC", "available": "0.5", "frozen": "0"}
    ],
    "message": "OK"
}"#;

pub const ORDER_RESPONSE: &str = r#"{
    "code": 0,
    "data": {
        "order_id": 13400,
        "market": "BTCUSDT",
        "market_type": "FUTURES",
        "side": "buy",
        "type": "limit",
        "amount": "0.001",
        "price": "30000",
        "unfilled_amount": "0.001",
        "filled_amount": "0",
        "filled_value": "0",
        "client_id": "grid-1",
        "fee": "0",
        "fee_ccy": "USDT",
        "maker_fee_rate": "0.0003",
        "taker_fee_rate": "0.0005",
        "last_filled_amount": "0",
        "last_filled_price": "0",
        "realized_pnl": "0",
        "created_at": 1689152421692,
        "updated_at": 1689152421692
    },
    "message": "OK"
}"#;

pub const POSITIONS_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {
            "position_id": 246830219,
            "market": "BTCUSDT",
            "market_type": "FUTURES",
            "side": "long",
            "margin_mode": "cross",
            "open_interest": "0.0010",
            "close_avbl": "0.0010",
            "ath_position_amount": "0.0010",
            "unrealized_pnl": "0.00",
            "realized_pnl": "-0.01413182100000000000",
            "avg_entry_price": "28263.642",
            "cml_position_value": "28.263642",
            "max_position_value": "28.263642",
            "take_profit_price": "0.00",
            "stop_loss_price": "0.00",
            "take_profit_type": "latest_price",
            "stop_loss_type": "latest_price",
            "leverage": "50",
            "margin_avbl": "0.56527284",
            "ath_margin_size": "0.56527284",
            "position_margin_rate": "0.02",
            "maintenance_margin_rate": "0.005",
            "maintenance_margin_value": "0.14131821",
            "liq_price": "27857.42",
            "bkr_price": "27698.37",
            "adl_level": 1,
            "settle_price": "28263.642",
            "settle_value": "28.263642",
            "created_at": 1642153125914,
            "updated_at": 1642153125914
        }
    ],
    "pagination": {"total": 1, "has_next": false},
    "message": "OK"
}"#;

pub const SPOT_TICKER_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {
            "market": "BTCUSDT",
            "last": "30500.00",
            "open": "30000.00",
            "close": "30500.00",
            "high": "30800.00",
            "low": "29900.00",
            "volume": "85.2",
            "value": "2598600",
            "volume_sell": "40.1",
            "volume_buy": "45.1",
            "period": 86400
        }
    ],
    "message": "OK"
}"#;

pub const FUNDING_RATE_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {
            "market": "BTCUSDT",
            "mark_price": "29998.50",
            "latest_funding_rate": "0.0001",
            "next_funding_rate": "-0.00025",
            "max_funding_rate": "0.00375",
            "min_funding_rate": "-0.00375",
            "latest_funding_time": 1689148800000,
            "next_funding_time": 1689177600000
        }
    ],
    "message": "OK"
}"#;

pub const FUTURES_BALANCE_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {
            "ccy": "USDT",
            "available": "4500.25",
            "frozen": "0",
            "margin": "28.26",
            "transferrable": "4400.00",
            "unrealized_pnl": "-1.52"
        }
    ],
    "message": "OK"
}"#;

pub const MARGIN_BALANCE_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {
            "margin_account": "BTCUSDT",
            "base_ccy": "BTC",
            "quote_ccy": "USDT",
            "available": {"base_ccy": "0.3", "quote_ccy": "1200"},
            "frozen": {"base_ccy": "0", "quote_ccy": "0"},
            "repaid": {"base_ccy": "0", "quote_ccy": "500"},
            "interest": {"base_ccy": "0", "quote_ccy": "0.12"},
            "rik_rate": "2.35",
            "liq_price": "18000.00"
        }
    ],
    "message": "OK"
}"#;

pub const SPOT_ORDER_RESPONSE: &str = r#"{
    "code": 0,
    "data": {
        "order_id": 13401,
        "market": "BTCUSDT",
        "market_type": "SPOT",
        "side": "buy",
        "type": "market",
        "amount": "10",
        "price": "0",
        "unfilled_amount": "0",
        "filled_amount": "0.00032",
        "filled_value": "10",
        "fee": "0.02",
        "fee_ccy": "USDT",
        "created_at": 1689152421692,
        "updated_at": 1689152421692
    },
    "message": "OK"
}"#;

pub const PENDING_ORDERS_RESPONSE: &str = r#"{
    "code": 0,
    "data": [
        {
            "order_id": 13400,
            "market": "BTCUSDT",
            "market_type": "SPOT",
            "side": "sell",
            "type": "limit",
            "amount": "0.5",
            "price": "31000",
            "unfilled_amount": "0.5",
            "filled_amount": "0",
            "filled_value": "0",
            "created_at": 1689152421692
        }
    ],
    "pagination": {"total": 7, "has_next": true},
    "message": "OK"
}"#;

pub const POSITION_RESPONSE: &str = r#"{
    "code": 0,
    "data": {
        "position_id": 246830219,
        "market": "BTCUSDT",
        "market_type": "FUTURES",
        "side": "long",
        "margin_mode": "isolated",
        "open_interest": "0.0010",
        "unrealized_pnl": "0.00",
        "avg_entry_price": "28263.642",
        "leverage": "20",
        "margin_avbl": "14.02",
        "liq_price": "26990.10",
        "created_at": 1642153125914,
        "updated_at": 1642153125914
    },
    "message": "OK"
}"#;

pub const EMPTY_DATA_RESPONSE: &str = r#"{"code": 0, "data": {}, "message": "OK"}"#;

pub const INSUFFICIENT_BALANCE_RESPONSE: &str =
    r#"{"code": 3109, "data": {}, "message": "balance not enough"}"#;

pub fn credentials() -> Credentials {
    Credentials::new(ACCESS_ID, SECRET_KEY).unwrap()
}

/// Client pointed at the mock server, without credentials
pub fn public_client(server: &MockServer) -> CoinexRestClient {
    CoinexRestClient::with_config(ClientConfig::new().with_base_url(server.uri())).unwrap()
}

/// Client pointed at the mock server, with test credentials
pub fn private_client(server: &MockServer) -> CoinexRestClient {
    CoinexRestClient::with_config(
        ClientConfig::new()
            .with_base_url(server.uri())
            .with_credentials(credentials()),
    )
    .unwrap()
}

pub fn header<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Path and query exactly as received, the way the server reconstructs it
pub fn request_path(request: &Request) -> String {
    match request.url.query() {
        Some(query) => format!("{}?{}", request.url.path(), query),
        None => request.url.path().to_string(),
    }
}

pub fn body_text(request: &Request) -> String {
    String::from_utf8(request.body.clone()).unwrap()
}

/// Recompute the signature from what arrived on the wire and compare
pub fn assert_signature(request: &Request) {
    let timestamp = header(request, "X-COINEX-TIMESTAMP").expect("timestamp header");
    let expected = credentials()
        .sign(
            request.method.as_str(),
            &request_path(request),
            &body_text(request),
            timestamp,
        )
        .unwrap();

    assert_eq!(header(request, "X-COINEX-KEY"), Some(ACCESS_ID));
    assert_eq!(header(request, "X-COINEX-SIGN"), Some(expected.as_str()));
    assert_eq!(timestamp.len(), 13, "timestamp should be in milliseconds");
}

pub async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}
