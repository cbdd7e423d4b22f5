//! Order driver
//!
//! Runs one session against the exchange:
//!
//! ```text
//! Start -> BalancesShown -> CancelRequested -> Done
//!                        -> ParamsCollected -> LadderComputed -> ConfirmationPending
//!                               -> Declined -> Done
//!                               -> Confirmed -> Submitting -> Done
//! ```
//!
//! Every exchange call is awaited before the next one starts. Orders are
//! submitted one at a time, buys before sells, innermost level first. A failed
//! order is reported and skipped; orders already placed stay on the book.

use crate::calculator::OrderLadder;
use crate::console::Console;
use crate::params::{
    validate_base_size, validate_pair, validate_size_increment, validate_spread_percentage,
    validate_target_price, validate_total_orders, LadderError, LadderParameters, LadderPlan,
};
use max_client::{Account, ExchangeClient, OrderRequest, RestError, Side};
use std::fmt;
use std::io;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Exchange request failed: {0}")]
    Exchange(#[from] RestError),

    #[error("Invalid ladder: {0}")]
    Ladder(#[from] LadderError),

    #[error("Console I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Input closed while waiting for: {0}")]
    InputClosed(String),
}

pub type Result<T> = std::result::Result<T, DriverError>;

/// What the user wants to do this session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Cancel,
    Place,
}

impl FromStr for Mode {
    type Err = LadderError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cancel" => Ok(Mode::Cancel),
            "place" => Ok(Mode::Place),
            other => Err(LadderError::Parse {
                input: other.to_string(),
                expected: "'cancel' or 'place'",
            }),
        }
    }
}

/// Per-order tally of one submission loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub placed: usize,
    pub failed: usize,
}

impl SubmissionReport {
    pub fn attempted(&self) -> usize {
        self.placed + self.failed
    }
}

impl fmt::Display for SubmissionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} order(s) attempted: {} placed, {} failed",
            self.attempted(),
            self.placed,
            self.failed
        )
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Cancelled { canceled: usize },
    Declined,
    Submitted(SubmissionReport),
}

/// Non-zero balances, largest first
pub fn nonzero_balances(accounts: &[Account]) -> Vec<(String, f64)> {
    let mut balances: Vec<(String, f64)> = accounts
        .iter()
        .map(|a| (a.currency.clone(), a.amount()))
        .filter(|(_, amount)| *amount > 0.0)
        .collect();

    balances.sort_by(|a, b| b.1.total_cmp(&a.1));
    balances
}

fn parse_number<T: FromStr>(input: &str, expected: &'static str) -> std::result::Result<T, LadderError> {
    input.trim().parse().map_err(|_| LadderError::Parse {
        input: input.trim().to_string(),
        expected,
    })
}

fn parse_side(input: &str) -> std::result::Result<Side, LadderError> {
    input.parse().map_err(|_| LadderError::Parse {
        input: input.trim().to_string(),
        expected: "'buy' or 'sell'",
    })
}

fn ladder_side(ladder: &OrderLadder, side: Side) -> (&[f64], &[f64]) {
    match side {
        Side::Buy => (ladder.buy_prices.as_slice(), ladder.buy_sizes.as_slice()),
        Side::Sell => (ladder.sell_prices.as_slice(), ladder.sell_sizes.as_slice()),
    }
}

pub struct OrderDriver<'a, E: ExchangeClient + ?Sized, C: Console> {
    client: &'a E,
    console: C,
}

impl<'a, E: ExchangeClient + ?Sized, C: Console> OrderDriver<'a, E, C> {
    pub fn new(client: &'a E, console: C) -> Self {
        Self { client, console }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Run a full session
    ///
    /// With a `plan`, the ladder parameters and pair are taken from it instead
    /// of being prompted for; mode selection and confirmation still happen.
    pub async fn run(&mut self, plan: Option<&LadderPlan>) -> Result<Outcome> {
        self.show_balances().await?;

        match self.select_mode()? {
            Mode::Cancel => self.cancel_interactive().await,
            Mode::Place => match plan {
                Some(plan) => {
                    let (params, pair) = (plan.parameters()?, plan.validated_pair()?);
                    self.place(&params, &pair).await
                }
                None => {
                    let (params, ladder) = self.collect_ladder()?;
                    let pair =
                        self.ask_valid("Enter the trading pair (e.g., 'btcusd'): ", validate_pair)?;
                    self.place_ladder(&params, &ladder, &pair).await
                }
            },
        }
    }

    /// Print non-zero balances, largest first
    pub async fn show_balances(&mut self) -> Result<()> {
        let accounts = self.client.balances().await?;
        let balances = nonzero_balances(&accounts);

        debug!("{} accounts, {} with a balance", accounts.len(), balances.len());

        if balances.is_empty() {
            self.console.print("[I] No non-zero balances found.");
        } else {
            self.console.print("[I] Your Account Balances:");
            for (currency, amount) in &balances {
                self.console.print(&format!("    {}: {:.4}", currency, amount));
            }
        }
        self.console.print("");

        Ok(())
    }

    pub fn select_mode(&mut self) -> Result<Mode> {
        self.ask_valid(
            "Do you want to cancel all orders or place new orders? Enter 'cancel' or 'place': ",
            |s: &str| s.parse(),
        )
    }

    async fn cancel_interactive(&mut self) -> Result<Outcome> {
        let pair = self.ask_valid(
            "Enter the trading pair to cancel orders (e.g., 'maxtwd'): ",
            validate_pair,
        )?;
        let side = self.ask_valid("Which side to cancel? Enter 'sell' or 'buy': ", parse_side)?;

        self.cancel(&pair, side).await
    }

    /// Cancel every open order for `pair` on `side` and print what came back
    pub async fn cancel(&mut self, pair: &str, side: Side) -> Result<Outcome> {
        info!("Canceling {} orders on {}", side, pair);

        let canceled = self.client.cancel_orders(pair, side).await?;

        self.console.print(&format!(
            "[I] Canceled orders for {} on the {} side:",
            pair, side
        ));
        if canceled.is_empty() {
            self.console.print("    (no open orders)");
        }
        for order in &canceled {
            self.console.print(&format!("    {}", order));
        }
        self.console.print("");

        Ok(Outcome::Cancelled {
            canceled: canceled.len(),
        })
    }

    /// Prompt for the five ladder parameters, re-prompting on bad input
    pub fn collect_parameters(&mut self) -> Result<LadderParameters> {
        let target_price = self.ask_valid("Enter the target price: ", |s| {
            let value = parse_number::<f64>(s, "a price")?;
            validate_target_price(value).map(|_| value)
        })?;

        let spread_percentage = self.ask_valid("Enter the spread percentage: (0.5-5) ", |s| {
            let value = parse_number::<f64>(s, "a percentage")?;
            validate_spread_percentage(value).map(|_| value)
        })?;

        let total_orders = self.ask_valid("Enter the total number of orders: (20-50) ", |s| {
            let value = parse_number::<usize>(s, "a whole number")?;
            validate_total_orders(value).map(|_| value)
        })?;

        let base_size = self.ask_valid("Enter the base order size: ", |s| {
            let value = parse_number::<f64>(s, "a size")?;
            validate_base_size(value).map(|_| value)
        })?;

        let size_increment = self.ask_valid(
            "Enter the order size increment percentage: (5-10) ",
            |s| {
                let value = parse_number::<f64>(s, "a percentage")? / 100.0;
                validate_size_increment(value).map(|_| value)
            },
        )?;

        Ok(LadderParameters::new(
            target_price,
            spread_percentage,
            total_orders,
            base_size,
            size_increment,
        )?)
    }

    /// Prompt for parameters until they give a ladder that can be placed
    pub fn collect_ladder(&mut self) -> Result<(LadderParameters, OrderLadder)> {
        loop {
            let params = self.collect_parameters()?;
            match OrderLadder::build(&params) {
                Ok(ladder) => return Ok((params, ladder)),
                Err(e) => {
                    warn!("Rejected ladder parameters: {}", e);
                    self.console.print(&format!("[E] {}", e));
                }
            }
        }
    }

    /// Compute, show, confirm and submit a ladder on `pair`
    pub async fn place(&mut self, params: &LadderParameters, pair: &str) -> Result<Outcome> {
        let ladder = OrderLadder::build(params)?;
        self.place_ladder(params, &ladder, pair).await
    }

    async fn place_ladder(
        &mut self,
        params: &LadderParameters,
        ladder: &OrderLadder,
        pair: &str,
    ) -> Result<Outcome> {
        info!(
            "Computed {}-level ladder on {} around {}",
            ladder.len(),
            pair,
            params.target_price()
        );

        self.display_ladder(pair, ladder)?;

        if !self.confirm()? {
            info!("Placement declined");
            self.console.print("Order placement canceled.");
            return Ok(Outcome::Declined);
        }

        let report = self.submit(pair, ladder).await;
        Ok(Outcome::Submitted(report))
    }

    fn display_ladder(&mut self, pair: &str, ladder: &OrderLadder) -> Result<()> {
        let total_buy_value = ladder.total_buy_value()?;
        let total_sell_value = ladder.total_sell_value()?;

        for i in 0..ladder.len() {
            self.console.print(&format!(
                "Buy Order {} - Price: {:.4}, Size: {:.2}",
                i + 1,
                ladder.buy_prices[i],
                ladder.buy_sizes[i]
            ));
            self.console.print(&format!(
                "Sell Order {} - Price: {:.4}, Size: {:.2}",
                i + 1,
                ladder.sell_prices[i],
                ladder.sell_sizes[i]
            ));
        }

        self.console.print("");
        self.console.print("Please review your orders:");
        self.console.print(&format!("Trading Pair: {}", pair));
        self.console.print(&format!("Total Number of Orders: {}", ladder.len()));
        self.console.print(&format!("Total Buy Value: {:.2}", total_buy_value));
        self.console.print(&format!("Total Sell Value: {:.2}", total_sell_value));
        self.console.print("");

        Ok(())
    }

    /// Only an explicit "yes" confirms
    fn confirm(&mut self) -> Result<bool> {
        let answer = self.ask("Do you want to proceed with placing these orders? (yes/no): ")?;
        Ok(answer.eq_ignore_ascii_case("yes"))
    }

    /// Submit every order of the ladder, buys first
    ///
    /// Failures are printed and counted, never retried, and do not stop the
    /// loop.
    pub async fn submit(&mut self, pair: &str, ladder: &OrderLadder) -> SubmissionReport {
        let mut report = SubmissionReport::default();

        info!("Submitting {} orders on {}", ladder.len() * 2, pair);

        for side in [Side::Buy, Side::Sell] {
            let (prices, sizes) = ladder_side(ladder, side);

            for (price, size) in prices.iter().zip(sizes) {
                let order = OrderRequest::new(pair, side, *price, *size);

                match self.client.create_order(&order).await {
                    Ok(placed) => {
                        report.placed += 1;
                        self.console.print(&format!(
                            "Placed {} order at {} for size {}: {}",
                            side, order.price, order.size, placed
                        ));
                    }
                    Err(e) => {
                        report.failed += 1;
                        warn!("{} order at {} for size {} failed: {}", side, order.price, order.size, e);
                        self.console.print(&format!(
                            "Failed to place {} order at {} for size {}: {}",
                            side, order.price, order.size, e
                        ));
                    }
                }
            }
        }

        info!("Submission finished: {}", report);
        self.console.print("");
        self.console.print(&format!("[I] {}", report));

        report
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        match self.console.read_line(prompt)? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(DriverError::InputClosed(prompt.trim().to_string())),
        }
    }

    /// Ask until `parse` accepts the answer
    fn ask_valid<T, F>(&mut self, prompt: &str, parse: F) -> Result<T>
    where
        F: Fn(&str) -> std::result::Result<T, LadderError>,
    {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!("Rejected input '{}': {}", answer, e);
                    self.console.print(&format!("[E] {}", e));
                }
            }
        }
    }
}
