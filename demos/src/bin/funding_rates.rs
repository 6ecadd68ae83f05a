//! Demo 2: Futures Funding Rate Table
//!
//! Showcases: futures tickers, funding rates
//!
//! Run: cargo run --bin funding_rates

use coinex_rest::CoinexRestClient;
use colored::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

const MARKETS: [&str; 3] = ["BTCUSDT", "ETHUSDT", "SOLUSDT"];

/// Funding settles every 8 hours
const PERIODS_PER_YEAR: Decimal = dec!(1095);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  FUTURES FUNDING RATES".cyan().bold());
    println!("{}", "  CoinEx REST Demo - Perpetual Swap Analytics".cyan());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = CoinexRestClient::new()?;

    println!(
        "  {:<12} {:>14} {:>14} {:>14} {:>12}",
        "MARKET".white().bold(),
        "MARK PRICE".white().bold(),
        "INDEX PRICE".white().bold(),
        "NEXT RATE".white().bold(),
        "ANNUAL".white().bold()
    );
    println!("  {}", "─".repeat(70));

    for market in MARKETS {
        let ticker = client.get_market_information_futures(market).await?;
        let funding = client.get_funding_rate_futures(market).await?;

        let (Some(ticker), Some(funding)) = (ticker.first(), funding.first()) else {
            println!("  {:<12} {}", market.cyan(), "no data".dimmed());
            continue;
        };

        let rate = funding.next_rate().unwrap_or_default();
        let annual = rate * PERIODS_PER_YEAR * dec!(100);
        let rate_text = format!("{:+.6}%", rate * dec!(100));
        let rate_color = if rate > Decimal::ZERO {
            rate_text.green()
        } else if rate < Decimal::ZERO {
            rate_text.red()
        } else {
            rate_text.white()
        };

        println!(
            "  {:<12} {:>14} {:>14} {:>14} {:>11.2}%",
            market.cyan(),
            ticker.mark_price.as_deref().unwrap_or("-"),
            ticker.index_price.as_deref().unwrap_or("-"),
            rate_color,
            annual
        );
    }

    println!();
    Ok(())
}
