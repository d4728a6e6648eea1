//! Numeric normalizer for scraped price history.
//!
//! The exchange exports numbers in European format (`1.234,56`) and has
//! used more than one date format over the years. This turns a raw table
//! into an ascending [`PriceSeries`] with typed values.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::{columns, Cell, PriceRecord, PriceSeries, RawTable};

/// Date formats seen in stored history, most common first.
const DATE_FORMATS: [&str; 3] = ["%d.%m.%Y", "%m/%d/%Y", "%Y-%m-%d"];

/// Why a raw table could not be normalized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("price table is empty")]
    Empty,

    #[error("required column missing: {0}")]
    MissingColumn(&'static str),

    #[error("no last trade price in any row")]
    NoPrices,
}

/// Parse a European-formatted number.
///
/// `.` is a thousands separator and `,` the decimal point. Returns `None`
/// for blank or unparseable text.
pub fn parse_european_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let canonical: String = trimmed
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a date in any of the known export formats.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

fn numeric_cell(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(v) if v.is_finite() => Some(*v),
        Cell::Text(s) => parse_european_number(s),
        _ => None,
    }
}

fn date_cell(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Text(s) => parse_date(s),
        _ => None,
    }
}

/// Normalize a raw table into an ascending price series.
///
/// Missing optional columns leave their field null. Rows with an unreadable
/// date are dropped; on duplicate dates the first row in table order wins.
/// The last trade price is forward-filled, then back-filled.
pub fn normalize(table: &RawTable) -> Result<PriceSeries, NormalizationError> {
    if table.is_empty() {
        return Err(NormalizationError::Empty);
    }

    let date_idx = table
        .column_index(columns::DATE)
        .ok_or(NormalizationError::MissingColumn(columns::DATE))?;
    if table.column_index(columns::LAST_TRADE_PRICE).is_none() {
        return Err(NormalizationError::MissingColumn(columns::LAST_TRADE_PRICE));
    }

    let numeric: Vec<(&'static str, usize)> = columns::NUMERIC
        .iter()
        .filter_map(|name| table.column_index(name).map(|idx| (*name, idx)))
        .collect();

    let mut records = Vec::with_capacity(table.len());
    let mut dropped = 0usize;

    for row in table.rows() {
        let Some(date) = row.get(date_idx).and_then(date_cell) else {
            dropped += 1;
            continue;
        };

        let mut record = PriceRecord::empty(date);
        for (name, idx) in &numeric {
            if let Some(field) = record.field_mut(name) {
                *field = row.get(*idx).and_then(numeric_cell);
            }
        }
        records.push(record);
    }

    if dropped > 0 {
        warn!("Dropped {} rows with unreadable dates", dropped);
    }

    // Stable sort keeps table order among equal dates, so dedup keeps the first.
    records.sort_by_key(|r| r.date);
    let before = records.len();
    records.dedup_by_key(|r| r.date);
    if records.len() < before {
        debug!("Removed {} duplicate dates", before - records.len());
    }

    if records.is_empty() {
        return Err(NormalizationError::Empty);
    }

    fill_last_trade_price(&mut records)?;

    Ok(PriceSeries::from_sorted(records))
}

/// Forward-fill, then back-fill the close column.
fn fill_last_trade_price(records: &mut [PriceRecord]) -> Result<(), NormalizationError> {
    let mut last = None;
    for record in records.iter_mut() {
        match record.last_trade_price {
            Some(price) => last = Some(price),
            None => record.last_trade_price = last,
        }
    }

    let first = records
        .iter()
        .find_map(|r| r.last_trade_price)
        .ok_or(NormalizationError::NoPrices)?;
    for record in records.iter_mut() {
        if record.last_trade_price.is_some() {
            break;
        }
        record.last_trade_price = Some(first);
    }

    Ok(())
}
