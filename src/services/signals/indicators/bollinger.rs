//! Bollinger Bands indicator.

use crate::services::signals::{mean, rolling, std_dev, Bars, Indicator};

/// Which line of the bands to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Upper,
    Middle,
    Lower,
}

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(period)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// Standard deviation is the population form. Price at or above the upper
/// band reads as overbought, at or below the lower band as oversold.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
    band: Band,
}

impl BollingerBands {
    pub fn new(period: usize, band: Band) -> Self {
        Self {
            period: period.max(1),
            std_dev_multiplier: 2.0,
            band,
        }
    }
}

impl Indicator for BollingerBands {
    fn id(&self) -> &str {
        match self.band {
            Band::Upper => "bollinger_upper",
            Band::Middle => "bollinger_middle",
            Band::Lower => "bollinger_lower",
        }
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let offset = match self.band {
            Band::Upper => self.std_dev_multiplier,
            Band::Middle => 0.0,
            Band::Lower => -self.std_dev_multiplier,
        };
        rolling(&bars.close, self.period, |w| {
            Some(mean(w) + offset * std_dev(w))
        })
    }
}
