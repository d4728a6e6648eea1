use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::price::HistoricalPoint;

/// A named lookback over the most recent trading days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSpec {
    pub label: &'static str,
    pub size: usize,
}

impl WindowSpec {
    pub const ONE_DAY: WindowSpec = WindowSpec { label: "1d", size: 1 };
    pub const ONE_WEEK: WindowSpec = WindowSpec { label: "1w", size: 7 };
    pub const ONE_MONTH: WindowSpec = WindowSpec { label: "1m", size: 30 };

    /// Every window the analysis reports on.
    pub const ALL: [WindowSpec; 3] = [Self::ONE_DAY, Self::ONE_WEEK, Self::ONE_MONTH];

    /// Look up a window by its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.label == label)
    }
}

/// Sentinel text for an indicator with no defined values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Computed values of one indicator over one window.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorValue {
    /// Defined values in chronological order, nulls removed.
    Values(Vec<f64>),
    /// The window is too short for this indicator.
    Unavailable,
}

impl IndicatorValue {
    /// Collapse an aligned series. An all-null series becomes `Unavailable`.
    pub fn from_series(series: Vec<Option<f64>>) -> Self {
        let values: Vec<f64> = series
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        if values.is_empty() {
            IndicatorValue::Unavailable
        } else {
            IndicatorValue::Values(values)
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, IndicatorValue::Values(_))
    }

    /// Most recent defined value.
    pub fn latest(&self) -> Option<f64> {
        match self {
            IndicatorValue::Values(values) => values.last().copied(),
            IndicatorValue::Unavailable => None,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        match self {
            IndicatorValue::Values(values) => values,
            IndicatorValue::Unavailable => &[],
        }
    }
}

impl IntoIterator for IndicatorValue {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            IndicatorValue::Values(values) => values.into_iter(),
            IndicatorValue::Unavailable => Vec::new().into_iter(),
        }
    }
}

impl Serialize for IndicatorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IndicatorValue::Values(values) => values.serialize(serializer),
            IndicatorValue::Unavailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for IndicatorValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Values(Vec<f64>),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Values(values) => Ok(IndicatorValue::Values(values)),
            Repr::Text(text) if text == NOT_AVAILABLE => Ok(IndicatorValue::Unavailable),
            Repr::Text(text) => Err(serde::de::Error::custom(format!(
                "expected indicator values or \"{}\", got \"{}\"",
                NOT_AVAILABLE, text
            ))),
        }
    }
}

/// Indicator name to its values for one window.
pub type IndicatorResult = BTreeMap<String, IndicatorValue>;

/// Discrete trading decision for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSignal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSignal::Buy => write!(f, "Buy"),
            TradeSignal::Sell => write!(f, "Sell"),
            TradeSignal::Hold => write!(f, "Hold"),
        }
    }
}

/// Indicator battery and signal for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowAnalysis {
    pub indicators: IndicatorResult,
    pub signal: TradeSignal,
}

/// Full technical analysis for one stock code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub code: String,
    /// Keyed by window label ("1d", "1w", "1m").
    pub per_window: BTreeMap<String, WindowAnalysis>,
    pub historical_series: Vec<HistoricalPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_series_drops_nulls_in_order() {
        let value = IndicatorValue::from_series(vec![None, Some(1.0), None, Some(3.0)]);
        assert_eq!(value, IndicatorValue::Values(vec![1.0, 3.0]));
        assert_eq!(value.latest(), Some(3.0));
    }

    #[test]
    fn test_from_series_all_null_is_unavailable() {
        assert_eq!(
            IndicatorValue::from_series(vec![None, None]),
            IndicatorValue::Unavailable
        );
        assert_eq!(IndicatorValue::from_series(vec![]), IndicatorValue::Unavailable);
    }

    #[test]
    fn test_from_series_drops_non_finite() {
        let value = IndicatorValue::from_series(vec![Some(f64::NAN), Some(f64::INFINITY)]);
        assert!(!value.is_available());
    }

    #[test]
    fn test_indicator_value_serialization() {
        let values = serde_json::to_string(&IndicatorValue::Values(vec![1.5, 2.0])).unwrap();
        assert_eq!(values, "[1.5,2.0]");

        let unavailable = serde_json::to_string(&IndicatorValue::Unavailable).unwrap();
        assert_eq!(unavailable, "\"N/A\"");

        let parsed: IndicatorValue = serde_json::from_str("\"N/A\"").unwrap();
        assert_eq!(parsed, IndicatorValue::Unavailable);
        assert!(serde_json::from_str::<IndicatorValue>("\"nope\"").is_err());
    }

    #[test]
    fn test_window_from_label() {
        assert_eq!(WindowSpec::from_label("1w"), Some(WindowSpec::ONE_WEEK));
        assert_eq!(WindowSpec::from_label("1y"), None);
    }

    #[test]
    fn test_trade_signal_serialization() {
        assert_eq!(serde_json::to_string(&TradeSignal::Buy).unwrap(), "\"Buy\"");
        assert_eq!(TradeSignal::Hold.to_string(), "Hold");
    }
}
