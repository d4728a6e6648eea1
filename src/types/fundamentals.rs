use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Average, maximum and minimum of a column, ignoring nulls.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnStats {
    pub average: Option<f64>,
    pub maximum: Option<f64>,
    pub minimum: Option<f64>,
}

impl ColumnStats {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut maximum = f64::NEG_INFINITY;
        let mut minimum = f64::INFINITY;

        for v in values.into_iter().filter(|v| v.is_finite()) {
            count += 1;
            sum += v;
            maximum = maximum.max(v);
            minimum = minimum.min(v);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            average: Some(sum / count as f64),
            maximum: Some(maximum),
            minimum: Some(minimum),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeStats {
    pub total: f64,
    #[serde(flatten)]
    pub stats: ColumnStats,
}

/// Day-over-day move of the last trade price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub date: NaiveDate,
    pub percent: f64,
}

/// Turnover, volume and range statistics over a stock's full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalSummary {
    pub code: String,
    pub turnover: ColumnStats,
    pub volume: VolumeStats,
    /// Mean of the daily `Max - Min` spread.
    pub average_daily_range: Option<f64>,
    pub price_changes: Vec<PriceChange>,
}
