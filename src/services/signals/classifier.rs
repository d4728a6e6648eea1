//! Buy/Sell/Hold decision from the latest RSI and Bollinger values.

use crate::types::{IndicatorResult, TradeSignal};

/// RSI above this is overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// RSI below this is oversold.
pub const RSI_OVERSOLD: f64 = 30.0;

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Classify one window from its latest readings.
///
/// Without RSI or either band the answer is `Hold`. Otherwise `Sell` wins over
/// `Buy`: overbought RSI or a close at/above the upper band sells, oversold RSI
/// or a close at/below the lower band buys. A missing close leaves only the
/// RSI thresholds.
pub fn classify(
    rsi: Option<f64>,
    upper: Option<f64>,
    lower: Option<f64>,
    close: Option<f64>,
) -> TradeSignal {
    let (Some(rsi), Some(upper), Some(lower)) = (finite(rsi), finite(upper), finite(lower)) else {
        return TradeSignal::Hold;
    };
    let close = finite(close);

    if rsi > RSI_OVERBOUGHT || close.is_some_and(|c| c >= upper) {
        TradeSignal::Sell
    } else if rsi < RSI_OVERSOLD || close.is_some_and(|c| c <= lower) {
        TradeSignal::Buy
    } else {
        TradeSignal::Hold
    }
}

/// Classify from a computed battery and the window's latest close.
pub fn classify_window(indicators: &IndicatorResult, close: Option<f64>) -> TradeSignal {
    let latest = |key: &str| indicators.get(key).and_then(|v| v.latest());
    classify(
        latest("rsi"),
        latest("bollinger_upper"),
        latest("bollinger_lower"),
        close,
    )
}
