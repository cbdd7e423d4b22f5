//! Interactive order ladder for the MAX exchange
//!
//! Shows balances, then either cancels all orders on one side of a pair or
//! builds a geometric buy/sell ladder around a target price and places it
//! after confirmation.
//!
//! Requires environment variables (or `.env`):
//!   - MAX_API_KEY
//!   - MAX_API_SECRET
//!   - MAX_API_URL (optional)
//!
//! Usage:
//!   cargo run --bin max-ladder
//!   cargo run --bin max-ladder -- --plan plans/btctwd.yaml

use anyhow::Result;
use max_ladder_bot::bin_common::{load_plan_path_from_env, parse_args};
use max_ladder_bot::ladder::{init_tracing, AppConfig, LadderPlan, OrderDriver, StdConsole};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = parse_args();
    let plan = match load_plan_path_from_env(&args)? {
        Some(path) => Some(LadderPlan::load(&path)?),
        None => None,
    };

    let config = AppConfig::from_env()?;
    info!("Using MAX endpoint {}", config.base_url);
    let client = config.rest_client()?;

    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("MAX ORDER LADDER");
    println!("════════════════════════════════════════════════════════════════");
    println!();

    let mut driver = OrderDriver::new(&client, StdConsole::new());
    let outcome = driver.run(plan.as_ref()).await?;

    info!("Session finished: {:?}", outcome);
    Ok(())
}
