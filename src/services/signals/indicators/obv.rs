//! On-Balance Volume (OBV) indicator.

use crate::services::signals::{Bars, Indicator};

/// OBV (On-Balance Volume) indicator.
///
/// Cumulative volume indicator:
/// - If close < previous close: OBV -= volume
/// - Otherwise (including the first bar): OBV += volume
///
/// A bar without volume has no value and leaves the running total as is.
#[derive(Default)]
pub struct Obv;

impl Indicator for Obv {
    fn id(&self) -> &str {
        "obv"
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn compute(&self, bars: &Bars) -> Vec<Option<f64>> {
        let mut obv = 0.0;
        (0..bars.len())
            .map(|i| {
                let volume = bars.volume[i]?;
                let falling = match (i.checked_sub(1).and_then(|p| bars.close[p]), bars.close[i]) {
                    (Some(prev), Some(close)) => close < prev,
                    _ => false,
                };
                if falling {
                    obv -= volume;
                } else {
                    obv += volume;
                }
                Some(obv)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_support::bars_from;

    #[test]
    fn test_obv_accumulates_by_direction() {
        let mut bars = bars_from(vec![10.0, 11.0, 10.5, 10.5], 0.0);
        bars.volume = vec![Some(100.0), Some(50.0), Some(30.0), Some(20.0)];
        let values = Obv.compute(&bars);
        assert_eq!(
            values,
            vec![Some(100.0), Some(150.0), Some(120.0), Some(140.0)]
        );
    }

    #[test]
    fn test_obv_missing_volume() {
        let mut bars = bars_from(vec![10.0, 9.0, 8.0], 0.0);
        bars.volume = vec![Some(10.0), None, Some(5.0)];
        let values = Obv.compute(&bars);
        assert_eq!(values, vec![Some(10.0), None, Some(5.0)]);
    }
}
