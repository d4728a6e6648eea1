//! Turnover, volume and price-move statistics over a full history.

use crate::types::{ColumnStats, FundamentalSummary, PriceChange, PriceSeries, VolumeStats};

/// Summarize a normalized series. Null cells are skipped.
pub fn summarize(code: &str, series: &PriceSeries) -> FundamentalSummary {
    let records = series.records();

    let turnover = ColumnStats::from_values(records.iter().filter_map(|r| r.total_turnover));

    let volumes: Vec<f64> = records.iter().filter_map(|r| r.volume).collect();
    let volume = VolumeStats {
        total: volumes.iter().sum(),
        stats: ColumnStats::from_values(volumes.iter().copied()),
    };

    let average_daily_range = ColumnStats::from_values(
        records
            .iter()
            .filter_map(|r| Some(r.max_price? - r.min_price?)),
    )
    .average;

    let price_changes = records
        .windows(2)
        .filter_map(|pair| {
            let (prev, current) = (pair[0].last_trade_price?, pair[1].last_trade_price?);
            let percent = (current / prev - 1.0) * 100.0;
            percent.is_finite().then_some(PriceChange {
                date: pair[1].date,
                percent,
            })
        })
        .collect();

    FundamentalSummary {
        code: code.to_string(),
        turnover,
        volume,
        average_daily_range,
        price_changes,
    }
}
