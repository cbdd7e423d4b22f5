//! Prints order history for one market
//!
//! Requires environment variables (or `.env`):
//!   - MAX_API_KEY
//!   - MAX_API_SECRET
//!   - MAX_API_URL (optional)
//!
//! Usage:
//!   cargo run --bin order-history -- btctwd
//!   cargo run --bin order-history -- btctwd done cancel

use anyhow::Result;
use max_ladder_bot::bin_common::{history_args, parse_args};
use max_ladder_bot::ladder::{init_tracing, AppConfig};
use max_ladder_bot::max_client::ExchangeClient;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let (pair, states) = history_args(&parse_args())?;
    let client = AppConfig::from_env()?.rest_client()?;

    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("ORDER HISTORY: {} [{}]", pair, states.join(", "));
    println!("════════════════════════════════════════════════════════════════");
    println!();

    let orders = client.order_history(&pair, &states).await?;

    if orders.is_empty() {
        println!("  No orders found.");
    }
    for order in &orders {
        println!("  {}", order);
    }

    println!();
    println!("  Total: {} order(s)", orders.len());
    println!("════════════════════════════════════════════════════════════════");

    Ok(())
}
