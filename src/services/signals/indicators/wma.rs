//! Weighted Moving Average (WMA) indicator.

use crate::services::signals::{rolling, Bars, Indicator};

/// WMA (Weighted Moving Average) indicator.
///
/// Linearly weighted: the newest close in each period weighs `period`, the
/// oldest weighs 1. The period does not follow the analysis window.
pub struct Wma {
    period: usize,
}

impl Default for Wma {
    fn default() -> Self {
        Self { period: 9 }
    }
}

impl Wma {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }
}

impl Indicator for Wma {
    fn id(&self) -> &str {
        "wma"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let total_weight = (self.period * (self.period + 1)) as f64 / 2.0;
        rolling(&bars.close, self.period, |w| {
            let weighted: f64 = w
                .iter()
                .enumerate()
                .map(|(i, v)| (i + 1) as f64 * v)
                .sum();
            Some(weighted / total_weight)
        })
    }
}
