//! Small descriptive-statistics helpers over `Decimal` values.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::Serialize;

/// Five-number summary used for box plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxStats {
    pub min: Decimal,
    pub q1: Decimal,
    pub median: Decimal,
    pub q3: Decimal,
    pub max: Decimal,
}

impl BoxStats {
    /// Computes the summary of ascending `sorted` values; `None` when empty.
    pub fn from_sorted(sorted: &[Decimal]) -> Option<Self> {
        Some(Self {
            min: *sorted.first()?,
            q1: quantile(sorted, Decimal::new(25, 2))?,
            median: quantile(sorted, Decimal::new(50, 2))?,
            q3: quantile(sorted, Decimal::new(75, 2))?,
            max: *sorted.last()?,
        })
    }
}

/// The `q`-quantile (0..=1) of ascending `sorted` values, interpolating
/// linearly between the two nearest ranks.
pub fn quantile(sorted: &[Decimal], q: Decimal) -> Option<Decimal> {
    if sorted.is_empty() || q < Decimal::ZERO || q > Decimal::ONE {
        return None;
    }

    let position = q * Decimal::from(sorted.len() - 1);
    let lower = position.floor();
    let fraction = position - lower;
    let lower_idx = lower.to_usize()?;
    let upper_idx = (lower_idx + 1).min(sorted.len() - 1);

    let low = sorted[lower_idx];
    let high = sorted[upper_idx];
    Some(low + (high - low) * fraction)
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
}

/// An ordinary-least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trendline {
    pub slope: Decimal,
    pub intercept: Decimal,
    /// `None` when every `y` is identical.
    pub r_squared: Option<Decimal>,
}

impl Trendline {
    /// Fits a line through `points`. Needs at least two points and some
    /// variance in `x`. Returns `None` when the sums overflow `Decimal`.
    pub fn fit(points: &[(Decimal, Decimal)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let n = Decimal::from(points.len());
        let mean_x = checked_sum(points.iter().map(|(x, _)| *x))?.checked_div(n)?;
        let mean_y = checked_sum(points.iter().map(|(_, y)| *y))?.checked_div(n)?;

        let mut sxx = Decimal::ZERO;
        let mut syy = Decimal::ZERO;
        let mut sxy = Decimal::ZERO;
        for &(x, y) in points {
            let dx = x.checked_sub(mean_x)?;
            let dy = y.checked_sub(mean_y)?;
            sxx = sxx.checked_add(dx.checked_mul(dx)?)?;
            syy = syy.checked_add(dy.checked_mul(dy)?)?;
            sxy = sxy.checked_add(dx.checked_mul(dy)?)?;
        }

        if sxx.is_zero() {
            return None;
        }

        let slope = sxy.checked_div(sxx)?;
        let intercept = mean_y.checked_sub(slope.checked_mul(mean_x)?)?;
        // r² = (sxy / sxx) * (sxy / syy)
        let r_squared = if syy.is_zero() {
            None
        } else {
            Some(slope.checked_mul(sxy.checked_div(syy)?)?)
        };

        Some(Self {
            slope,
            intercept,
            r_squared,
        })
    }

    pub fn predict(&self, x: Decimal) -> Decimal {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn quantiles_interpolate_between_ranks() {
        let values = [dec!(1), dec!(2), dec!(3), dec!(4)];
        assert_eq!(quantile(&values, dec!(0)), Some(dec!(1)));
        assert_eq!(quantile(&values, dec!(0.5)), Some(dec!(2.5)));
        assert_eq!(quantile(&values, dec!(0.25)), Some(dec!(1.75)));
        assert_eq!(quantile(&values, dec!(1)), Some(dec!(4)));
        assert_eq!(quantile(&[], dec!(0.5)), None);
        assert_eq!(quantile(&values, dec!(1.5)), None);
    }

    #[test]
    fn box_stats_of_single_value_collapse() {
        let stats = BoxStats::from_sorted(&[dec!(7)]).unwrap();
        assert_eq!(stats.min, dec!(7));
        assert_eq!(stats.median, dec!(7));
        assert_eq!(stats.max, dec!(7));
        assert!(BoxStats::from_sorted(&[]).is_none());
    }

    #[test]
    fn box_stats_of_odd_count() {
        let stats = BoxStats::from_sorted(&[dec!(1), dec!(3), dec!(5), dec!(7), dec!(9)]).unwrap();
        assert_eq!(stats.q1, dec!(3));
        assert_eq!(stats.median, dec!(5));
        assert_eq!(stats.q3, dec!(7));
    }

    #[test]
    fn trendline_recovers_exact_line() {
        let points = [(dec!(1), dec!(5)), (dec!(2), dec!(7)), (dec!(3), dec!(9))];
        let fit = Trendline::fit(&points).unwrap();
        assert_eq!(fit.slope, dec!(2));
        assert_eq!(fit.intercept, dec!(3));
        assert_eq!(fit.r_squared, Some(dec!(1)));
        assert_eq!(fit.predict(dec!(10)), dec!(23));
    }

    #[test]
    fn trendline_needs_spread_in_x() {
        assert!(Trendline::fit(&[(dec!(1), dec!(1))]).is_none());
        assert!(Trendline::fit(&[(dec!(2), dec!(1)), (dec!(2), dec!(4))]).is_none());
    }

    #[test]
    fn trendline_gives_up_when_squares_overflow() {
        let huge = Decimal::from(1_000_000_000_000_000u64);
        assert!(Trendline::fit(&[(Decimal::ZERO, dec!(1)), (huge, dec!(2))]).is_none());
        assert!(Trendline::fit(&[(Decimal::ZERO, dec!(1)), (Decimal::MAX, dec!(2))]).is_none());
    }

    #[test]
    fn flat_trendline_has_no_r_squared() {
        let fit = Trendline::fit(&[(dec!(1), dec!(4)), (dec!(3), dec!(4))]).unwrap();
        assert_eq!(fit.slope, Decimal::ZERO);
        assert_eq!(fit.intercept, dec!(4));
        assert_eq!(fit.r_squared, None);
    }
}
