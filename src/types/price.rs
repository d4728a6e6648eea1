use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::table::{Cell, RawTable};

/// Column names of the exchange's symbol history export.
pub mod columns {
    pub const DATE: &str = "Date";
    pub const LAST_TRADE_PRICE: &str = "Last trade price";
    pub const MAX: &str = "Max";
    pub const MIN: &str = "Min";
    pub const AVG_PRICE: &str = "Avg. Price";
    pub const PERCENT_CHANGE: &str = "%chg.";
    pub const VOLUME: &str = "Volume";
    pub const TURNOVER_BEST: &str = "Turnover in BEST in denars";
    pub const TOTAL_TURNOVER: &str = "Total turnover in denars";

    /// Numeric columns in export order.
    pub const NUMERIC: [&str; 8] = [
        LAST_TRADE_PRICE,
        MAX,
        MIN,
        AVG_PRICE,
        PERCENT_CHANGE,
        VOLUME,
        TURNOVER_BEST,
        TOTAL_TURNOVER,
    ];
}

/// One traded day for one stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub last_trade_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_price: Option<f64>,
    pub avg_price: Option<f64>,
    pub percent_change: Option<f64>,
    pub volume: Option<f64>,
    pub turnover_best: Option<f64>,
    pub total_turnover: Option<f64>,
}

impl PriceRecord {
    /// A record with only a date set.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            last_trade_price: None,
            max_price: None,
            min_price: None,
            avg_price: None,
            percent_change: None,
            volume: None,
            turnover_best: None,
            total_turnover: None,
        }
    }

    /// Mutable access to a numeric field by its export column name.
    pub(crate) fn field_mut(&mut self, column: &str) -> Option<&mut Option<f64>> {
        match column {
            columns::LAST_TRADE_PRICE => Some(&mut self.last_trade_price),
            columns::MAX => Some(&mut self.max_price),
            columns::MIN => Some(&mut self.min_price),
            columns::AVG_PRICE => Some(&mut self.avg_price),
            columns::PERCENT_CHANGE => Some(&mut self.percent_change),
            columns::VOLUME => Some(&mut self.volume),
            columns::TURNOVER_BEST => Some(&mut self.turnover_best),
            columns::TOTAL_TURNOVER => Some(&mut self.total_turnover),
            _ => None,
        }
    }

    fn numeric_cells(&self) -> [Cell; 8] {
        [
            self.last_trade_price.into(),
            self.max_price.into(),
            self.min_price.into(),
            self.avg_price.into(),
            self.percent_change.into(),
            self.volume.into(),
            self.turnover_best.into(),
            self.total_turnover.into(),
        ]
    }
}

/// Point of the charting series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub last_trade_price: f64,
}

/// Normalized price history for one stock.
///
/// Records are strictly ascending by date. Only the normalizer builds one,
/// and it guarantees every `last_trade_price` is present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    pub(crate) fn from_sorted(records: Vec<PriceRecord>) -> Self {
        debug_assert!(records.windows(2).all(|w| w[0].date < w[1].date));
        Self { records }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent trading day.
    pub fn latest(&self) -> Option<&PriceRecord> {
        self.records.last()
    }

    /// Date and close for every day, oldest first.
    pub fn historical(&self) -> Vec<HistoricalPoint> {
        self.records
            .iter()
            .filter_map(|r| {
                r.last_trade_price.map(|price| HistoricalPoint {
                    date: r.date,
                    last_trade_price: price,
                })
            })
            .collect()
    }

    /// Render back to a table with typed cells.
    pub fn to_table(&self) -> RawTable {
        let mut table = RawTable::new(std::iter::once(columns::DATE).chain(columns::NUMERIC));
        for record in &self.records {
            let mut row = vec![Cell::Date(record.date)];
            row.extend(record.numeric_cells());
            table.push_row(row);
        }
        table
    }
}
