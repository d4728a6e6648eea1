//! Simple Moving Average (SMA) indicator.

use crate::services::signals::{mean, rolling, Bars, Indicator};

/// SMA (Simple Moving Average) indicator.
///
/// Calculates the average close over each trailing period.
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }
}

impl Indicator for Sma {
    fn id(&self) -> &str {
        "sma"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        rolling(&bars.close, self.period, |w| Some(mean(w)))
    }
}
