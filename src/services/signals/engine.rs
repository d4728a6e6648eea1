//! Stateless indicator engine over a single window.

use crate::services::signals::indicators::{
    Band, BollingerBands, Cci, ChaikinMoneyFlow, Ema, Kama, Macd, Obv, Rsi, Sma, Stochastic, Vma,
    Wma,
};
use crate::services::signals::{Bars, Indicator};
use crate::types::{IndicatorResult, IndicatorValue};
use tracing::debug;

/// The fixed indicator battery for a window of `window` records.
///
/// MACD and WMA keep their own periods. KAMA runs over `window + 1`.
pub fn battery(window: usize) -> Vec<Box<dyn Indicator>> {
    let window = window.max(1);
    vec![
        // Momentum indicators
        Box::new(Rsi::new(window)),
        Box::new(Stochastic::new(window)),
        Box::new(Macd::default()),
        Box::new(Cci::new(window)),
        // Volume indicators
        Box::new(ChaikinMoneyFlow::new(window)),
        Box::new(Obv),
        Box::new(Vma),
        // Trend indicators
        Box::new(Ema::new(window)),
        Box::new(Sma::new(window)),
        Box::new(Wma::default()),
        Box::new(Kama::new(window + 1)),
        // Volatility indicators
        Box::new(BollingerBands::new(window, Band::Upper)),
        Box::new(BollingerBands::new(window, Band::Lower)),
        Box::new(BollingerBands::new(window, Band::Middle)),
    ]
}

/// Run one indicator and collapse its series.
///
/// Too few bars, or a series with no defined value, is `Unavailable`.
pub fn evaluate(indicator: &dyn Indicator, bars: &Bars) -> IndicatorValue {
    if bars.len() < indicator.min_periods() {
        debug!(
            "{} unavailable: {} bars, needs {}",
            indicator.id(),
            bars.len(),
            indicator.min_periods()
        );
        return IndicatorValue::Unavailable;
    }
    IndicatorValue::from_series(indicator.compute(bars))
}

/// One entry point per indicator plus the batch computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn rsi(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&Rsi::new(window), bars)
    }

    pub fn stochastic(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&Stochastic::new(window), bars)
    }

    /// MACD line with the fixed 12/26 periods.
    pub fn macd(&self, bars: &Bars) -> IndicatorValue {
        evaluate(&Macd::default(), bars)
    }

    pub fn cci(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&Cci::new(window), bars)
    }

    pub fn chaikin_money_flow(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&ChaikinMoneyFlow::new(window), bars)
    }

    pub fn ema(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&Ema::new(window), bars)
    }

    pub fn sma(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&Sma::new(window), bars)
    }

    /// WMA with its fixed period of 9.
    pub fn wma(&self, bars: &Bars) -> IndicatorValue {
        evaluate(&Wma::default(), bars)
    }

    pub fn obv(&self, bars: &Bars) -> IndicatorValue {
        evaluate(&Obv, bars)
    }

    pub fn bollinger_upper(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&BollingerBands::new(window, Band::Upper), bars)
    }

    pub fn bollinger_lower(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&BollingerBands::new(window, Band::Lower), bars)
    }

    pub fn bollinger_middle(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&BollingerBands::new(window, Band::Middle), bars)
    }

    /// KAMA over `window + 1`.
    pub fn kama(&self, bars: &Bars, window: usize) -> IndicatorValue {
        evaluate(&Kama::new(window + 1), bars)
    }

    /// Cumulative VMA over every bar passed in.
    pub fn vma(&self, bars: &Bars) -> IndicatorValue {
        evaluate(&Vma, bars)
    }

    /// Every indicator in the battery, keyed by its id.
    pub fn compute_battery(&self, bars: &Bars, window: usize) -> IndicatorResult {
        battery(window)
            .iter()
            .map(|indicator| (indicator.id().to_string(), evaluate(indicator.as_ref(), bars)))
            .collect()
    }
}
