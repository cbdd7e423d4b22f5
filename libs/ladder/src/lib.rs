//! Order ladder generation and submission for the MAX exchange
//!
//! - **calculator**: geometric price and size ladders
//! - **params**: validated ladder inputs and YAML plans
//! - **driver**: the interactive balance / cancel / place session
//! - **console**: prompt and print abstraction used by the driver
//! - **config**: credentials and plan loading
//! - **logging**: tracing setup

pub mod calculator;
pub mod config;
pub mod console;
pub mod driver;
pub mod logging;
pub mod params;

pub use calculator::{compute_prices, compute_sizes, round_to, total_value, OrderLadder};
pub use config::{AppConfig, ConfigError};
pub use console::{Console, StdConsole};
#[cfg(feature = "testing")]
pub use console::ScriptedConsole;
pub use driver::{DriverError, Mode, OrderDriver, Outcome, SubmissionReport};
pub use logging::init_tracing;
pub use params::{LadderError, LadderParameters, LadderPlan};
