//! Wire types for the MAX REST API v2

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(format!("unknown side '{}', expected 'buy' or 'sell'", other)),
        }
    }
}

/// A single limit order to submit
///
/// Built right before the submission call and dropped once its result is
/// reported.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub pair: String,
    pub side: Side,
    pub price: f64,
    pub size: f64,
}

impl OrderRequest {
    pub fn new(pair: impl Into<String>, side: Side, price: f64, size: f64) -> Self {
        Self {
            pair: pair.into(),
            side,
            price,
            size,
        }
    }
}

/// Order as reported by the exchange
///
/// Numeric fields stay string-encoded, the way MAX sends them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: u64,

    pub side: Side,

    #[serde(default)]
    pub ord_type: Option<String>,

    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub market: String,

    #[serde(default)]
    pub volume: String,

    #[serde(default)]
    pub remaining_volume: Option<String>,

    #[serde(default)]
    pub executed_volume: Option<String>,

    #[serde(default)]
    pub created_at_in_ms: Option<i64>,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} @ {} [{}]",
            self.id,
            self.market,
            self.side,
            self.volume,
            self.price.as_deref().unwrap_or("market"),
            self.state
        )
    }
}

/// Account balance entry from `/members/accounts`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub currency: String,

    pub balance: String,

    #[serde(default)]
    pub locked: Option<String>,
}

impl Account {
    /// Available balance as a float, zero when the exchange sends something unparsable
    pub fn amount(&self) -> f64 {
        self.balance.parse().unwrap_or(0.0)
    }
}

/// Order states accepted by the order history endpoint
pub mod order_state {
    pub const WAIT: &str = "wait";
    pub const CONVERT: &str = "convert";
    pub const DONE: &str = "done";
    pub const CANCEL: &str = "cancel";
    pub const FINALIZING: &str = "finalizing";
    pub const FAILED: &str = "failed";
}

/// Error body returned by MAX on rejected requests
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub code: i64,
    pub message: String,
}
