//! Ladder parameters and their validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LadderError {
    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Could not parse '{input}' as {expected}")]
    Parse { input: String, expected: &'static str },

    #[error("Price and size sequences differ in length ({prices} prices, {sizes} sizes)")]
    LengthMismatch { prices: usize, sizes: usize },
}

pub type Result<T> = std::result::Result<T, LadderError>;

pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> LadderError {
    LadderError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

pub fn validate_target_price(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("target price", "must be a positive number"));
    }
    Ok(())
}

/// Zero spread is accepted and yields a flat ladder
pub fn validate_spread_percentage(value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..100.0).contains(&value) {
        return Err(invalid("spread percentage", "must be at least 0 and below 100"));
    }
    Ok(())
}

pub fn validate_total_orders(value: usize) -> Result<()> {
    if value == 0 {
        return Err(invalid("total orders", "must be at least 1"));
    }
    Ok(())
}

pub fn validate_base_size(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("base order size", "must be a positive number"));
    }
    Ok(())
}

/// `value` is a fraction (0.05 for 5%)
pub fn validate_size_increment(value: f64) -> Result<()> {
    if !value.is_finite() || value <= -1.0 {
        return Err(invalid("size increment", "must be greater than -100%"));
    }
    Ok(())
}

pub fn validate_pair(value: &str) -> Result<String> {
    let pair = value.trim().to_lowercase();
    if pair.is_empty() || !pair.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid("trading pair", "expected something like 'btctwd'"));
    }
    Ok(pair)
}

/// Validated inputs for one ladder computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderParameters {
    target_price: f64,
    spread_percentage: f64,
    total_orders: usize,
    base_size: f64,
    size_increment: f64,
}

impl LadderParameters {
    /// `size_increment` is a fraction, not a percentage
    pub fn new(
        target_price: f64,
        spread_percentage: f64,
        total_orders: usize,
        base_size: f64,
        size_increment: f64,
    ) -> Result<Self> {
        validate_target_price(target_price)?;
        validate_spread_percentage(spread_percentage)?;
        validate_total_orders(total_orders)?;
        validate_base_size(base_size)?;
        validate_size_increment(size_increment)?;

        Ok(Self {
            target_price,
            spread_percentage,
            total_orders,
            base_size,
            size_increment,
        })
    }

    pub fn target_price(&self) -> f64 {
        self.target_price
    }

    pub fn spread_percentage(&self) -> f64 {
        self.spread_percentage
    }

    pub fn total_orders(&self) -> usize {
        self.total_orders
    }

    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    pub fn size_increment(&self) -> f64 {
        self.size_increment
    }
}

/// Placement request supplied upfront instead of through prompts
///
/// ```yaml
/// pair: btctwd
/// target_price: 950000
/// spread_percentage: 1.5
/// total_orders: 20
/// base_size: 0.001
/// size_increment_pct: 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LadderPlan {
    pub pair: String,
    pub target_price: f64,
    pub spread_percentage: f64,
    pub total_orders: usize,
    pub base_size: f64,
    #[serde(default)]
    pub size_increment_pct: f64,
}

impl LadderPlan {
    pub fn parameters(&self) -> Result<LadderParameters> {
        LadderParameters::new(
            self.target_price,
            self.spread_percentage,
            self.total_orders,
            self.base_size,
            self.size_increment_pct / 100.0,
        )
    }

    pub fn validated_pair(&self) -> Result<String> {
        validate_pair(&self.pair)
    }
}
