//! Technical indicators and the trading signal derived from them.
//!
//! Indicators produce a value series aligned to their input, with `None`
//! wherever the lookback is incomplete or an input is missing.

pub mod classifier;
pub mod engine;
pub mod indicators;

pub use classifier::{classify, classify_window};
pub use engine::{battery, evaluate, IndicatorEngine};

use crate::types::PriceRecord;

/// Price and volume columns of a window, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bars {
    pub close: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub volume: Vec<Option<f64>>,
}

impl Bars {
    pub fn from_records(records: &[PriceRecord]) -> Self {
        Self {
            close: records.iter().map(|r| r.last_trade_price).collect(),
            high: records.iter().map(|r| r.max_price).collect(),
            low: records.iter().map(|r| r.min_price).collect(),
            volume: records.iter().map(|r| r.volume).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Latest close, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.close.last().copied().flatten()
    }

    /// (High + Low + Close) / 3 per bar.
    pub fn typical_price(&self) -> Vec<Option<f64>> {
        (0..self.len())
            .map(|i| Some((self.high[i]? + self.low[i]? + self.close[i]?) / 3.0))
            .collect()
    }
}

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Key this indicator is reported under.
    fn id(&self) -> &str;

    /// Minimum number of bars before any value can be defined.
    fn min_periods(&self) -> usize;

    /// Compute the full series, one entry per input bar.
    fn compute(&self, bars: &Bars) -> Vec<Option<f64>>;
}

/// Exponentially weighted mean seeded with the first value.
///
/// `state = state + alpha * (x - state)`. Values are emitted once
/// `min_periods` observations have been seen; a missing input yields `None`
/// at that position and leaves the state untouched.
pub(crate) fn ewm(values: &[Option<f64>], alpha: f64, min_periods: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut state: Option<f64> = None;
    let mut seen = 0usize;

    for value in values {
        let Some(x) = *value else {
            out.push(None);
            continue;
        };
        seen += 1;
        let next = match state {
            Some(prev) => prev + alpha * (x - prev),
            None => x,
        };
        state = Some(next);
        out.push(if seen >= min_periods { Some(next) } else { None });
    }

    out
}

/// Smoothing factor for an EMA of the given span.
pub(crate) fn span_alpha(span: f64) -> f64 {
    2.0 / (span + 1.0)
}

/// Apply `f` to every complete trailing window of `window` values.
///
/// Positions before the first full window, or whose window holds a missing
/// value, are `None`.
pub(crate) fn rolling<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut buf = Vec::with_capacity(window);
    for end in (window - 1)..values.len() {
        let slice = &values[end + 1 - window..=end];
        if slice.iter().all(Option::is_some) {
            buf.clear();
            buf.extend(slice.iter().flatten());
            out[end] = f(&buf);
        }
    }

    out
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ewm_seeds_with_first_value() {
        let out = ewm(&[Some(10.0), Some(20.0), Some(30.0)], 0.5, 1);
        assert_eq!(out, vec![Some(10.0), Some(15.0), Some(22.5)]);
    }

    #[test]
    fn test_ewm_min_periods() {
        let out = ewm(&[Some(1.0), Some(2.0), Some(3.0)], 0.5, 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!(out[2].is_some());
    }

    #[test]
    fn test_ewm_skips_missing() {
        let out = ewm(&[Some(10.0), None, Some(20.0)], 0.5, 1);
        assert_eq!(out, vec![Some(10.0), None, Some(15.0)]);
    }

    #[test]
    fn test_rolling_requires_full_window() {
        let values = [Some(1.0), Some(2.0), Some(3.0), None, Some(5.0)];
        let sums = rolling(&values, 2, |w| Some(w.iter().sum()));
        assert_eq!(sums, vec![None, Some(3.0), Some(5.0), None, None]);
    }

    #[test]
    fn test_rolling_shorter_than_window() {
        let sums = rolling(&[Some(1.0)], 3, |w| Some(w.iter().sum()));
        assert_eq!(sums, vec![None]);
    }

    #[test]
    fn test_typical_price_needs_all_inputs() {
        let mut bars = test_support::bars_from(vec![10.0, 20.0], 1.0);
        bars.high[1] = None;
        assert_eq!(bars.typical_price(), vec![Some(10.0), None]);
    }

    #[test]
    fn test_std_dev_is_population() {
        test_support::assert_close(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.0);
    }
}
