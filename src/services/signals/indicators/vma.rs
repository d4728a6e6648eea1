//! Volume-Weighted Moving Average (VMA) indicator.

use crate::services::signals::{Bars, Indicator};

/// Cumulative volume-weighted average of the close.
///
/// VMA = Cumulative(Close * Volume) / Cumulative(Volume)
///
/// Runs over every bar it is given rather than a trailing period.
#[derive(Default)]
pub struct Vma;

impl Indicator for Vma {
    fn id(&self) -> &str {
        "vma"
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let mut cum_price_volume = 0.0;
        let mut cum_volume = 0.0;

        (0..bars.len())
            .map(|i| {
                let (close, volume) = (bars.close[i]?, bars.volume[i]?);
                cum_price_volume += close * volume;
                cum_volume += volume;
                if cum_volume == 0.0 {
                    None
                } else {
                    Some(cum_price_volume / cum_volume)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_support::{assert_close, bars_from};

    #[test]
    fn test_vma_cumulative_ratio() {
        let mut bars = bars_from(vec![10.0, 20.0, 30.0], 0.0);
        bars.volume = vec![Some(1.0), Some(3.0), Some(0.0)];
        let values = Vma.compute(&bars);
        assert_close(values[0].unwrap(), 10.0);
        assert_close(values[1].unwrap(), 70.0 / 4.0);
        assert_close(values[2].unwrap(), 70.0 / 4.0);
    }

    #[test]
    fn test_vma_zero_volume_is_undefined() {
        let values = Vma.compute(&bars_from(vec![10.0, 11.0], 0.0));
        assert!(values.iter().all(Option::is_none));
    }
}
