//! Stochastic Oscillator indicator.

use crate::services::signals::{rolling, Bars, Indicator};

/// Stochastic Oscillator (%K).
///
/// Compares closing price to price range over a period:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
///
/// A bar whose lookback has no range (highest high equals lowest low) has
/// no value. At least two bars are required.
pub struct Stochastic {
    k_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self { k_period: 14 }
    }
}

impl Stochastic {
    pub fn new(k_period: usize) -> Self {
        Self {
            k_period: k_period.max(1),
        }
    }
}

impl Indicator for Stochastic {
    fn id(&self) -> &str {
        "stochastic"
    }

    fn min_periods(&self) -> usize {
        self.k_period.max(2)
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let lowest = rolling(&bars.low, self.k_period, |w| {
            w.iter().copied().reduce(f64::min)
        });
        let highest = rolling(&bars.high, self.k_period, |w| {
            w.iter().copied().reduce(f64::max)
        });

        (0..bars.len())
            .map(|i| {
                if i + 1 < self.min_periods() {
                    return None;
                }
                let (close, low, high) = (bars.close[i]?, lowest[i]?, highest[i]?);
                if high <= low {
                    return None;
                }
                Some((close - low) / (high - low) * 100.0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_support::{assert_close, bars_from, uptrend};

    #[test]
    fn test_stochastic_id_and_min_periods() {
        let stoch = Stochastic::default();
        assert_eq!(stoch.id(), "stochastic");
        assert_eq!(stoch.min_periods(), 14);
        assert_eq!(Stochastic::new(1).min_periods(), 2);
    }

    #[test]
    fn test_stochastic_uptrend_high_k() {
        let values = Stochastic::new(7).compute(&uptrend(20));
        let k = values.last().unwrap().unwrap();
        assert!(k > 50.0, "Stochastic %K in uptrend should be > 50, got {}", k);
    }

    #[test]
    fn test_stochastic_known_value() {
        // Lows 9, 11, 13 and highs 11, 13, 15 over 3 bars: range 9..15, close 14.
        let values = Stochastic::new(3).compute(&bars_from(vec![10.0, 12.0, 14.0], 1.0));
        assert!(values[..2].iter().all(Option::is_none));
        assert_close(values[2].unwrap(), 5.0 / 6.0 * 100.0);
    }

    #[test]
    fn test_stochastic_flat_range_is_undefined() {
        let mut bars = bars_from(vec![10.0, 10.0, 10.0], 1.0);
        bars.high = vec![Some(10.0); 3];
        bars.low = vec![Some(10.0); 3];
        let values = Stochastic::new(2).compute(&bars);
        assert!(values.iter().all(Option::is_none));
    }

    #[test]
    fn test_stochastic_value_range() {
        let values = Stochastic::new(5).compute(&uptrend(30));
        for k in values.into_iter().flatten() {
            assert!((0.0..=100.0).contains(&k));
        }
    }
}
