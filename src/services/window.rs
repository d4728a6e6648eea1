//! Lookback window selection.

use crate::types::{PriceRecord, PriceSeries, WindowSpec};

/// Most recent `size` records of an ascending slice, or all of them if shorter.
pub fn most_recent(records: &[PriceRecord], size: usize) -> &[PriceRecord] {
    let start = records.len().saturating_sub(size);
    &records[start..]
}

/// Slice a series into one view per window, oldest record first in each.
///
/// A series shorter than a window yields a shorter (possibly empty) slice.
pub fn select<'a>(
    series: &'a PriceSeries,
    windows: &[WindowSpec],
) -> Vec<(WindowSpec, &'a [PriceRecord])> {
    windows
        .iter()
        .map(|spec| (*spec, most_recent(series.records(), spec.size)))
        .collect()
}
