//! Demo 1: Market Snapshot
//!
//! Showcases: public market data, no credentials needed
//!
//! Run: cargo run --bin market_snapshot -- BTCUSDT

use coinex_rest::CoinexRestClient;
use coinex_types::{timestamp_to_strdatetime, CandlePeriod};
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let market = std::env::args().nth(1).unwrap_or_else(|| "BTCUSDT".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  MARKET SNAPSHOT: {}", market).cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = CoinexRestClient::new()?;

    let time = client.get_server_time().await?;
    println!(
        "{} Server time: {}\n",
        "✓".green(),
        timestamp_to_strdatetime(time.timestamp / 1000)?
    );

    let depth = client.get_market_depth(&market, 10, "0").await?;
    println!("  {}", "ORDER BOOK".white().bold());
    for level in depth.depth.asks.iter().take(5).rev() {
        println!("  {:>16} {:>16}", level[0].red(), level[1]);
    }
    println!("  {}", "─".repeat(34));
    for level in depth.depth.bids.iter().take(5) {
        println!("  {:>16} {:>16}", level[0].green(), level[1]);
    }
    if let (Some(spread), Some(mid)) = (depth.depth.spread(), depth.depth.mid_price()) {
        println!("\n  Spread: {}  Mid: {}", spread.to_string().yellow(), mid);
    }
    println!();

    for ticker in client.get_market_ticker(&market).await? {
        let change = ticker
            .change_percent()
            .map(|c| format!("{:+.2}%", c))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} last {}  high {}  low {}  24h {}",
            "TICKER".white().bold(),
            ticker.last.cyan(),
            ticker.high,
            ticker.low,
            change
        );
    }
    println!();

    println!("  {}", "LAST 5 HOURLY CANDLES".white().bold());
    let candles = client
        .get_market_candlesticks(&market, 5, CandlePeriod::Hour1)
        .await?;
    for candle in candles {
        println!(
            "  {}  O {:>12} H {:>12} L {:>12} C {:>12}",
            timestamp_to_strdatetime(candle.created_at / 1000)?,
            candle.open,
            candle.high,
            candle.low,
            candle.close
        );
    }
    println!();

    println!("  {}", "RECENT DEALS".white().bold());
    let deals = client.get_market_deals(&market, Some(5), None).await?;
    for deal in deals {
        let side = match deal.side {
            coinex_types::OrderSide::Buy => "BUY ".green(),
            coinex_types::OrderSide::Sell => "SELL".red(),
        };
        println!("  {} {:>14} x {}", side, deal.price, deal.amount);
    }

    Ok(())
}
