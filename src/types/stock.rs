use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default key prefix for per-stock history blobs.
pub const DEFAULT_KEY_PREFIX: &str = "Stock_Data";

/// A listed issuer and where its history lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockIdentity {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub storage_key: String,
}

impl StockIdentity {
    /// Identity for a code under the given key prefix.
    pub fn new(code: &str, prefix: &str) -> Self {
        let code = normalize_code(code);
        Self {
            storage_key: storage_key(&code, prefix),
            code,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Stock codes are case-insensitive and stored upper-case.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Blob key for a stock code, e.g. `Stock_Data/ALK.csv`.
pub fn storage_key(code: &str, prefix: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        format!("{}.csv", normalize_code(code))
    } else {
        format!("{}/{}.csv", prefix, normalize_code(code))
    }
}

/// Recover the stock code from a blob key under `prefix`.
pub fn code_from_key(key: &str, prefix: &str) -> Option<String> {
    let prefix = prefix.trim_end_matches('/');
    let rest = if prefix.is_empty() {
        key
    } else {
        key.strip_prefix(prefix)?.strip_prefix('/')?
    };
    let code = rest.strip_suffix(".csv")?;
    if code.is_empty() || code.contains('/') {
        None
    } else {
        Some(normalize_code(code))
    }
}

/// Latest trading date across the catalog, grouped by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreshnessReport {
    /// Codes whose most recent record falls on each date.
    pub by_date: BTreeMap<NaiveDate, Vec<String>>,
    /// Codes that could not be read, with the reason.
    pub errors: Vec<FreshnessError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshnessError {
    pub code: String,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_layout() {
        assert_eq!(storage_key("alk", DEFAULT_KEY_PREFIX), "Stock_Data/ALK.csv");
        assert_eq!(storage_key("KMB", "prefix/"), "prefix/KMB.csv");
        assert_eq!(storage_key("KMB", ""), "KMB.csv");
    }

    #[test]
    fn test_code_from_key() {
        assert_eq!(
            code_from_key("Stock_Data/ALK.csv", DEFAULT_KEY_PREFIX),
            Some("ALK".to_string())
        );
        assert_eq!(code_from_key("Articles/ALK.csv", DEFAULT_KEY_PREFIX), None);
        assert_eq!(code_from_key("Stock_Data/ALK.json", DEFAULT_KEY_PREFIX), None);
        assert_eq!(code_from_key("Stock_Data/a/b.csv", DEFAULT_KEY_PREFIX), None);
    }

    #[test]
    fn test_identity_normalizes_code() {
        let stock = StockIdentity::new(" tnb ", DEFAULT_KEY_PREFIX).with_name("Komercijalna Banka");
        assert_eq!(stock.code, "TNB");
        assert_eq!(stock.storage_key, "Stock_Data/TNB.csv");
        assert_eq!(stock.name.as_deref(), Some("Komercijalna Banka"));
    }
}
