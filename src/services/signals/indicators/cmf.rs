//! Chaikin Money Flow (CMF) indicator.

use crate::services::signals::{rolling, Bars, Indicator};

/// Chaikin Money Flow.
///
/// Measures buying and selling pressure over a period:
/// CMF = Sum(Money Flow Volume) / Sum(Volume)
/// - Positive: Buying pressure
/// - Negative: Selling pressure
///
/// A bar without a high/low range (or missing either) contributes a zero
/// multiplier; a bar without volume breaks the window.
pub struct ChaikinMoneyFlow {
    period: usize,
}

impl Default for ChaikinMoneyFlow {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl ChaikinMoneyFlow {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    fn multiplier(close: Option<f64>, high: Option<f64>, low: Option<f64>) -> f64 {
        match (close, high, low) {
            (Some(c), Some(h), Some(l)) if h > l => ((c - l) - (h - c)) / (h - l),
            _ => 0.0,
        }
    }
}

impl Indicator for ChaikinMoneyFlow {
    fn id(&self) -> &str {
        "chaikin_money_flow"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let money_flow_volume: Vec<Option<f64>> = (0..bars.len())
            .map(|i| {
                let volume = bars.volume[i]?;
                Some(Self::multiplier(bars.close[i], bars.high[i], bars.low[i]) * volume)
            })
            .collect();

        let sum = |w: &[f64]| Some(w.iter().sum::<f64>());
        let flow = rolling(&money_flow_volume, self.period, sum);
        let volume = rolling(&bars.volume, self.period, sum);

        flow.into_iter()
            .zip(volume)
            .map(|(flow, volume)| {
                let volume = volume?;
                if volume == 0.0 {
                    return None;
                }
                Some(flow? / volume)
            })
            .collect()
    }
}
