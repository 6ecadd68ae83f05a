//! Demo 3: Account Overview
//!
//! Showcases: signed requests, balances, positions, open orders
//!
//! Requires COINEX_ACCESS_ID and COINEX_SECRET_KEY.
//!
//! Run: cargo run --bin account_overview -- BTCUSDT

use coinex_rest::{CoinexRestClient, RestError};
use coinex_types::MarketType;
use colored::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let market = std::env::args().nth(1).unwrap_or_else(|| "BTCUSDT".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = match CoinexRestClient::from_env() {
        Ok(client) => client,
        Err(RestError::Auth(e)) => {
            eprintln!("{} {}", "✗".red(), e);
            eprintln!("  Set COINEX_ACCESS_ID and COINEX_SECRET_KEY to run this demo.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("  {}", "SPOT BALANCES".white().bold());
    for balance in client.get_balance().await? {
        if balance.total().unwrap_or_default() > Decimal::ZERO {
            println!(
                "  {:<8} available {:>18} frozen {:>18}",
                balance.ccy.cyan(),
                balance.available,
                balance.frozen
            );
        }
    }
    println!();

    println!("  {}", "FUTURES BALANCES".white().bold());
    for balance in client.get_balance_futures().await? {
        println!(
            "  {:<8} available {:>18} unrealized {:>14}",
            balance.ccy.cyan(),
            balance.available,
            balance.unrealized_pnl.as_deref().unwrap_or("0")
        );
    }
    println!();

    println!("  {}", format!("POSITIONS ({})", market).white().bold());
    let positions = client.get_current_position(&market, None, None, None).await?;
    if positions.is_empty() {
        println!("  {}", "no open positions".dimmed());
    }
    for position in &positions.items {
        let pnl = position.unrealized_pnl().unwrap_or_default();
        let pnl_text = if pnl >= Decimal::ZERO {
            pnl.to_string().green()
        } else {
            pnl.to_string().red()
        };
        println!(
            "  {} {} x{} entry {} pnl {} liq {}",
            position.side.as_str().to_uppercase(),
            position.open_interest,
            position.leverage,
            position.avg_entry_price.as_deref().unwrap_or("-"),
            pnl_text,
            position.liq_price.as_deref().unwrap_or("-")
        );
    }
    println!();

    println!("  {}", format!("OPEN SPOT ORDERS ({})", market).white().bold());
    let orders = client
        .get_pending_orders(&market, MarketType::Spot, None, None, None)
        .await?;
    if orders.is_empty() {
        println!("  {}", "no open orders".dimmed());
    }
    for order in &orders.items {
        println!(
            "  #{} {} {} {} @ {}",
            order.order_id,
            order.side,
            order.order_type,
            order.amount,
            order.price
        );
    }
    if orders.has_next() {
        println!("  {}", "(more pages available)".dimmed());
    }

    Ok(())
}
