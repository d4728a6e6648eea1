//! Exponential Moving Average (EMA) indicator.

use crate::services::signals::{ewm, span_alpha, Bars, Indicator};

/// EMA (Exponential Moving Average) indicator.
///
/// Like SMA but gives more weight to recent prices. Seeded with the first
/// close and reported from the `period`-th bar on.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }
}

impl Indicator for Ema {
    fn id(&self) -> &str {
        "ema"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        ewm(&bars.close, span_alpha(self.period as f64), self.period)
    }
}
