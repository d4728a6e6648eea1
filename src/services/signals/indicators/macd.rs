//! MACD (Moving Average Convergence Divergence) indicator.

use crate::services::signals::{ewm, span_alpha, Bars, Indicator};

/// MACD indicator.
///
/// Shows the relationship between two EMAs of the close:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
///
/// Periods are fixed regardless of the analysis window, so the line needs
/// 26 bars before its first value. [`Indicator::compute`] reports the MACD
/// line.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    fn ema(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
        ewm(values, span_alpha(period as f64), period)
    }

    /// EMA of the MACD line over the signal period.
    pub fn signal_line(&self, bars: &Bars) -> Vec<Option<f64>> {
        Self::ema(&self.compute(bars), self.signal_period)
    }
}

impl Indicator for Macd {
    fn id(&self) -> &str {
        "macd"
    }

    fn min_periods(&self) -> usize {
        self.slow_period
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let fast = Self::ema(&bars.close, self.fast_period);
        let slow = Self::ema(&bars.close, self.slow_period);

        fast.into_iter()
            .zip(slow)
            .map(|(f, s)| Some(f? - s?))
            .collect()
    }
}
