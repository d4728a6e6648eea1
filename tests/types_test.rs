//! Unit tests for types module

use chrono::NaiveDate;
use mse_signals::types::*;
use serde_json::json;

#[test]
fn test_window_specs() {
    let labels: Vec<(&str, usize)> = WindowSpec::ALL.iter().map(|w| (w.label, w.size)).collect();
    assert_eq!(labels, vec![("1d", 1), ("1w", 7), ("1m", 30)]);
    assert_eq!(WindowSpec::from_label("1w"), Some(WindowSpec::ONE_WEEK));
    assert_eq!(WindowSpec::from_label("1y"), None);
}

#[test]
fn test_indicator_value_serialization() {
    let values = IndicatorValue::Values(vec![1.5, 2.0]);
    assert_eq!(serde_json::to_value(&values).unwrap(), json!([1.5, 2.0]));
    assert_eq!(
        serde_json::to_value(IndicatorValue::Unavailable).unwrap(),
        json!("N/A")
    );

    let parsed: IndicatorValue = serde_json::from_str("\"N/A\"").unwrap();
    assert_eq!(parsed, IndicatorValue::Unavailable);
    assert!(serde_json::from_str::<IndicatorValue>("\"none\"").is_err());
}

#[test]
fn test_trade_signal_serialization() {
    assert_eq!(serde_json::to_string(&TradeSignal::Buy).unwrap(), "\"Buy\"");
    assert_eq!(serde_json::to_string(&TradeSignal::Sell).unwrap(), "\"Sell\"");
    assert_eq!(TradeSignal::Hold.to_string(), "Hold");
}

#[test]
fn test_analysis_result_shape() {
    let mut indicators = IndicatorResult::new();
    indicators.insert("rsi".to_string(), IndicatorValue::Unavailable);
    indicators.insert("sma".to_string(), IndicatorValue::Values(vec![10.0]));

    let mut per_window = std::collections::BTreeMap::new();
    per_window.insert(
        "1d".to_string(),
        WindowAnalysis {
            indicators,
            signal: TradeSignal::Hold,
        },
    );

    let result = AnalysisResult {
        code: "ALK".to_string(),
        per_window,
        historical_series: vec![HistoricalPoint {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            last_trade_price: 10.0,
        }],
    };

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["per_window"]["1d"]["indicators"]["rsi"], "N/A");
    assert_eq!(value["per_window"]["1d"]["indicators"]["sma"], json!([10.0]));
    assert_eq!(value["per_window"]["1d"]["signal"], "Hold");
    assert_eq!(value["historical_series"][0]["date"], "2024-03-01");

    let back: AnalysisResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_stock_identity_keys() {
    let stock = StockIdentity::new("alk", DEFAULT_KEY_PREFIX).with_name("Alkaloid AD Skopje");
    assert_eq!(stock.code, "ALK");
    assert_eq!(stock.storage_key, "Stock_Data/ALK.csv");
    assert_eq!(code_from_key(&stock.storage_key, DEFAULT_KEY_PREFIX), Some("ALK".to_string()));
}

#[test]
fn test_cell_rendering_uses_export_format() {
    assert_eq!(Cell::Number(1234.5).render(), "1234,5");
    assert_eq!(
        Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).render(),
        "02.01.2024"
    );
    assert_eq!(Cell::Null.render(), "");
}

#[test]
fn test_column_stats_ignore_non_finite() {
    let stats = ColumnStats::from_values([1.0, f64::NAN, 3.0]);
    assert_eq!(stats.average, Some(2.0));
    assert_eq!(stats.maximum, Some(3.0));
    assert_eq!(stats.minimum, Some(1.0));
    assert_eq!(ColumnStats::from_values(Vec::new()), ColumnStats::default());
}
