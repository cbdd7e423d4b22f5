//! Ladder pricing and sizing
//!
//! Prices widen geometrically away from the target: the i-th buy sits at
//! `target * m^(i+1)` and the i-th sell at `target / m^(i+1)` with
//! `m = 1 - spread/100`. Sizes grow geometrically from the base size.

use crate::params::{invalid, LadderError, LadderParameters, Result};

/// Fractional digits kept for prices and sizes before totals and submission
pub const PRICE_DECIMALS: u32 = 4;
pub const SIZE_DECIMALS: u32 = 4;

/// Buy and sell prices and sizes, paired by index
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLadder {
    pub buy_prices: Vec<f64>,
    pub sell_prices: Vec<f64>,
    pub buy_sizes: Vec<f64>,
    pub sell_sizes: Vec<f64>,
}

impl OrderLadder {
    /// Compute and round the full ladder for `params`
    ///
    /// Fails when a level would not survive rounding as a positive, finite
    /// order (deep ladders collapse to zero buys or overflow on the sell side).
    pub fn build(params: &LadderParameters) -> Result<Self> {
        let (buy_prices, sell_prices) = compute_prices(
            params.target_price(),
            params.spread_percentage(),
            params.total_orders(),
        );
        let sizes = compute_sizes(
            params.base_size(),
            params.size_increment(),
            params.total_orders(),
        );

        let ladder = Self {
            buy_prices: round_all(&buy_prices, PRICE_DECIMALS),
            sell_prices: round_all(&sell_prices, PRICE_DECIMALS),
            buy_sizes: round_all(&sizes, SIZE_DECIMALS),
            sell_sizes: round_all(&sizes, SIZE_DECIMALS),
        };
        ladder.check()?;

        Ok(ladder)
    }

    fn check(&self) -> Result<()> {
        let sides = [
            ("buy order", "price", &self.buy_prices),
            ("sell order", "price", &self.sell_prices),
            ("buy order", "size", &self.buy_sizes),
            ("sell order", "size", &self.sell_sizes),
        ];

        for (order, field, values) in sides {
            if let Some(i) = values.iter().position(|v| !v.is_finite() || *v <= 0.0) {
                return Err(invalid(
                    "ladder",
                    format!("{} {} has a {} of {}", order, i + 1, field, values[i]),
                ));
            }
        }

        for (side, total) in [
            ("buy", self.total_buy_value()?),
            ("sell", self.total_sell_value()?),
        ] {
            if !total.is_finite() {
                return Err(invalid("ladder", format!("total {} value overflows", side)));
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buy_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buy_prices.is_empty()
    }

    pub fn total_buy_value(&self) -> Result<f64> {
        total_value(&self.buy_prices, &self.buy_sizes)
    }

    pub fn total_sell_value(&self) -> Result<f64> {
        total_value(&self.sell_prices, &self.sell_sizes)
    }
}

/// Buy and sell price sequences around `target_price`
pub fn compute_prices(
    target_price: f64,
    spread_percentage: f64,
    total_orders: usize,
) -> (Vec<f64>, Vec<f64>) {
    let step = 1.0 - spread_percentage / 100.0;

    (1..=total_orders)
        .map(|exponent| {
            let multiplier = step.powi(exponent as i32);
            (target_price * multiplier, target_price / multiplier)
        })
        .unzip()
}

/// Sizes starting at `base_size`, each `(1 + increment)` times the previous
pub fn compute_sizes(base_size: f64, increment: f64, total_orders: usize) -> Vec<f64> {
    let growth = 1.0 + increment;
    (0..total_orders)
        .map(|i| base_size * growth.powi(i as i32))
        .collect()
}

/// Sum of `price * size` over paired entries
pub fn total_value(prices: &[f64], sizes: &[f64]) -> Result<f64> {
    if prices.len() != sizes.len() {
        return Err(LadderError::LengthMismatch {
            prices: prices.len(),
            sizes: sizes.len(),
        });
    }

    Ok(prices.iter().zip(sizes).map(|(p, s)| p * s).sum())
}

/// Round half away from zero to `decimals` fractional digits
///
/// Values too large to scale are already whole and come back unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

pub fn round_all(values: &[f64], decimals: u32) -> Vec<f64> {
    values.iter().map(|v| round_to(*v, decimals)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{} != {}", a, e);
        }
    }

    #[test]
    fn test_prices_for_one_percent_spread() {
        let (buys, sells) = compute_prices(100.0, 1.0, 3);

        assert_close(&round_all(&buys, 4), &[99.0, 98.01, 97.0299]);
        assert_close(&round_all(&sells, 4), &[101.0101, 102.0304, 103.061]);
    }

    #[test]
    fn test_prices_are_reciprocal_around_target() {
        let target = 2500.0;
        let (buys, sells) = compute_prices(target, 2.5, 20);

        for (buy, sell) in buys.iter().zip(&sells) {
            let product = buy * sell;
            assert!((product - target * target).abs() / (target * target) < 1e-12);
        }
    }

    #[test]
    fn test_prices_widen_monotonically() {
        let target = 31.5;
        let (buys, sells) = compute_prices(target, 0.5, 50);

        for i in 1..buys.len() {
            assert!(target - buys[i - 1] < target - buys[i]);
            assert!(sells[i - 1] - target < sells[i] - target);
        }
        assert!(buys.iter().all(|p| *p < target));
        assert!(sells.iter().all(|p| *p > target));
    }

    #[test]
    fn test_zero_spread_is_flat() {
        let (buys, sells) = compute_prices(42.0, 0.0, 4);
        assert!(buys.iter().chain(&sells).all(|p| *p == 42.0));
    }

    #[test]
    fn test_sizes_grow_geometrically() {
        let sizes = compute_sizes(1.0, 0.1, 3);
        assert_close(&round_all(&sizes, 4), &[1.0, 1.1, 1.21]);
    }

    #[test]
    fn test_sizes_non_decreasing() {
        let sizes = compute_sizes(0.25, 0.07, 40);
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));

        let flat = compute_sizes(3.0, 0.0, 5);
        assert_eq!(flat, vec![3.0; 5]);
    }

    #[test]
    fn test_negative_increment_shrinks() {
        let sizes = compute_sizes(10.0, -0.5, 3);
        assert_close(&sizes, &[10.0, 5.0, 2.5]);
    }

    #[test]
    fn test_total_value() {
        let total = total_value(&[99.0, 98.01], &[1.0, 1.1]).unwrap();
        assert!((total - (99.0 + 98.01 * 1.1)).abs() < 1e-9);

        assert_eq!(total_value(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_total_value_rejects_mismatched_lengths() {
        let err = total_value(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, LadderError::LengthMismatch { prices: 2, sizes: 1 }));
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let (buys, sells) = compute_prices(123.456789, 1.7, 30);
        for values in [buys, sells, compute_sizes(0.123456, 0.09, 30)] {
            let once = round_all(&values, 4);
            let twice = round_all(&once, 4);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_build_ladder() {
        let params = LadderParameters::new(100.0, 1.0, 3, 1.0, 0.1).unwrap();
        let ladder = OrderLadder::build(&params).unwrap();

        assert_eq!(ladder.len(), 3);
        assert_close(&ladder.buy_prices, &[99.0, 98.01, 97.0299]);
        assert_close(&ladder.sell_prices, &[101.0101, 102.0304, 103.061]);
        assert_eq!(ladder.buy_sizes, ladder.sell_sizes);
        assert_close(&ladder.buy_sizes, &[1.0, 1.1, 1.21]);

        let expected_buy = 99.0 * 1.0 + 98.01 * 1.1 + 97.0299 * 1.21;
        assert!((ladder.total_buy_value().unwrap() - expected_buy).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_keeps_huge_values() {
        assert_eq!(round_to(1e305, 4), 1e305);
        assert_eq!(round_to(f64::MAX, 4), f64::MAX);
    }

    #[test]
    fn test_build_huge_target_stays_below_and_above() {
        let target = 1e305;
        let params = LadderParameters::new(target, 1.0, 2, 1.0, 0.0).unwrap();
        let ladder = OrderLadder::build(&params).unwrap();

        assert!(ladder.buy_prices.iter().all(|p| p.is_finite() && *p < target));
        assert!(ladder.sell_prices.iter().all(|p| p.is_finite() && *p > target));
    }

    #[test]
    fn test_build_rejects_buys_rounding_to_zero() {
        // 100 * 0.5^21 rounds to 0.0000
        let params = LadderParameters::new(100.0, 50.0, 40, 1.0, 0.0).unwrap();
        let err = OrderLadder::build(&params).unwrap_err();

        assert!(matches!(err, LadderError::InvalidParameter { name: "ladder", .. }));
        assert!(err.to_string().contains("buy order 21 has a price of 0"));
    }

    #[test]
    fn test_build_rejects_overflowing_sells() {
        let params = LadderParameters::new(1e300, 50.0, 30, 1.0, 0.0).unwrap();
        let err = OrderLadder::build(&params).unwrap_err();

        assert!(err.to_string().contains("sell order"));
        assert!(err.to_string().contains("inf"));
    }

    #[test]
    fn test_build_rejects_sizes_shrinking_to_zero() {
        let params = LadderParameters::new(100.0, 1.0, 20, 1.0, -0.9).unwrap();
        let err = OrderLadder::build(&params).unwrap_err();

        assert!(err.to_string().contains("size of 0"));
    }
}
