//! Kaufman Adaptive Moving Average (KAMA) indicator.

use crate::services::signals::{ewm, span_alpha, Bars, Indicator};

/// Ratio between the slow and fast EMA spans.
const SENSITIVITY: f64 = 2.0;

/// KAMA as a blend of a slow and a fast EMA.
///
/// slow = EMA(period), fast = EMA(period / 2)
/// KAMA = slow + (fast - slow) / (1 + 2)
///
/// Both EMAs are seeded with the first close, so every bar has a value.
pub struct Kama {
    period: usize,
}

impl Kama {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }
}

impl Indicator for Kama {
    fn id(&self) -> &str {
        "kama"
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let slow_span = self.period as f64;
        let fast_span = (slow_span / SENSITIVITY).max(1.0);

        let slow = ewm(&bars.close, span_alpha(slow_span), 1);
        let fast = ewm(&bars.close, span_alpha(fast_span), 1);

        slow.into_iter()
            .zip(fast)
            .map(|(s, f)| {
                let (s, f) = (s?, f?);
                Some(s + (f - s) / (1.0 + SENSITIVITY))
            })
            .collect()
    }
}
