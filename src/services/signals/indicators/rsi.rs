//! Relative Strength Index (RSI) indicator.

use crate::services::signals::{ewm, Bars, Indicator};

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
///
/// Gains and losses are smoothed with Wilder's method (`alpha = 1 / period`).
/// The first bar counts as an unchanged close so smoothing starts on it; at
/// least one real price change is needed before a value is reported.
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    fn changes(bars: &Bars) -> Vec<Option<f64>> {
        (0..bars.len())
            .map(|i| {
                let current = bars.close[i]?;
                if i == 0 {
                    return Some(0.0);
                }
                Some(current - bars.close[i - 1]?)
            })
            .collect()
    }
}

impl Indicator for Rsi {
    fn id(&self) -> &str {
        "rsi"
    }

    fn min_periods(&self) -> usize {
        self.period.max(2)
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let changes = Self::changes(bars);
        let gains: Vec<Option<f64>> = changes.iter().map(|c| c.map(|v| v.max(0.0))).collect();
        let losses: Vec<Option<f64>> = changes.iter().map(|c| c.map(|v| (-v).max(0.0))).collect();

        let alpha = 1.0 / self.period as f64;
        let avg_gain = ewm(&gains, alpha, self.period);
        let avg_loss = ewm(&losses, alpha, self.period);

        avg_gain
            .into_iter()
            .zip(avg_loss)
            .enumerate()
            .map(|(i, (gain, loss))| {
                if i + 1 < self.min_periods() {
                    return None;
                }
                let (gain, loss) = (gain?, loss?);
                if loss == 0.0 {
                    return Some(100.0);
                }
                let rs = gain / loss;
                Some(100.0 - (100.0 / (1.0 + rs)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_support::{assert_close, bars_from, downtrend, uptrend};

    #[test]
    fn test_rsi_id_and_min_periods() {
        let rsi = Rsi::default();
        assert_eq!(rsi.id(), "rsi");
        assert_eq!(rsi.min_periods(), 14);
        assert_eq!(Rsi::new(1).min_periods(), 2);
    }

    #[test]
    fn test_rsi_first_value_at_period() {
        let values = Rsi::new(7).compute(&uptrend(10));
        assert!(values[..6].iter().all(Option::is_none));
        assert!(values[6..].iter().all(Option::is_some));
    }

    #[test]
    fn test_rsi_uptrend_is_100() {
        let values = Rsi::new(7).compute(&uptrend(20));
        assert_close(values.last().unwrap().unwrap(), 100.0);
    }

    #[test]
    fn test_rsi_downtrend_low_value() {
        let values = Rsi::new(7).compute(&downtrend(20));
        let last = values.last().unwrap().unwrap();
        assert!(last < 30.0, "RSI in downtrend should be < 30, got {}", last);
    }

    #[test]
    fn test_rsi_known_value() {
        // Period 2, closes 10, 12, 11: gains 0, 2, 0 and losses 0, 0, 1.
        // avg_gain = 0 -> 1 -> 0.5, avg_loss = 0 -> 0 -> 0.5, so RSI = 50.
        let values = Rsi::new(2).compute(&bars_from(vec![10.0, 12.0, 11.0], 1.0));
        assert_eq!(values[0], None);
        assert_close(values[1].unwrap(), 100.0);
        assert_close(values[2].unwrap(), 50.0);
    }

    #[test]
    fn test_rsi_value_range() {
        let closes = vec![10.0, 11.0, 10.5, 12.0, 11.0, 11.5, 10.0, 13.0];
        let values = Rsi::new(3).compute(&bars_from(closes, 1.0));
        for v in values.into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_rsi_single_bar_is_undefined() {
        let values = Rsi::new(1).compute(&bars_from(vec![10.0], 1.0));
        assert_eq!(values, vec![None]);
    }
}
