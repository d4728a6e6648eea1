//! Commodity Channel Index (CCI) indicator.

use crate::services::signals::{mean, rolling, Bars, Indicator};

/// Lambert's constant, scales CCI so most values fall within ±100.
const CCI_CONSTANT: f64 = 0.015;

/// CCI (Commodity Channel Index) indicator.
///
/// Measures the current price level relative to an average price level:
/// CCI = (TP - SMA) / (0.015 * Mean Deviation)
/// where TP = Typical Price = (High + Low + Close) / 3
///
/// Signals:
/// - Below -100: Oversold
/// - Above +100: Overbought
pub struct Cci {
    period: usize,
}

impl Default for Cci {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Cci {
    pub fn new(period: usize) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// Calculate mean deviation.
    fn mean_deviation(values: &[f64]) -> f64 {
        let m = mean(values);
        values.iter().map(|v| (v - m).abs()).sum::<f64>() / values.len() as f64
    }
}

impl Indicator for Cci {
    fn id(&self) -> &str {
        "cci"
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let typical = bars.typical_price();
        let sma = rolling(&typical, self.period, |w| Some(mean(w)));
        let mean_dev = rolling(&typical, self.period, |w| Some(Self::mean_deviation(w)));

        typical
            .iter()
            .zip(sma.iter().zip(&mean_dev))
            .map(|(tp, (sma, dev))| {
                let dev = (*dev)?;
                if dev == 0.0 {
                    return None;
                }
                Some(((*tp)? - (*sma)?) / (CCI_CONSTANT * dev))
            })
            .collect()
    }
}
