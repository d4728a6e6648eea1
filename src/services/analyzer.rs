//! Per-stock analysis: fetch, normalize, window, compute, classify.

use crate::services::fundamentals::summarize;
use crate::services::normalizer::{normalize, NormalizationError};
use crate::services::signals::{classify_window, Bars, IndicatorEngine};
use crate::services::storage::{BlobStore, StoreError};
use crate::services::window;
use crate::types::{
    normalize_code, AnalysisResult, FreshnessError, FreshnessReport, FundamentalSummary,
    PriceSeries, RawTable, WindowAnalysis, WindowSpec,
};
use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a stock could not be analyzed.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no price history for {0}")]
    NotFound(String),

    #[error("malformed price history: {0}")]
    Malformed(#[from] NormalizationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Runs the analysis pipeline against a blob store.
///
/// Holds no per-request state; every call reads the blob afresh.
#[derive(Clone)]
pub struct StockAnalyzer {
    store: Arc<dyn BlobStore>,
    engine: IndicatorEngine,
}

impl StockAnalyzer {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            engine: IndicatorEngine::new(),
        }
    }

    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    /// Fetch and normalize one stock's history.
    pub async fn load(&self, code: &str) -> Result<PriceSeries, AnalysisError> {
        let code = normalize_code(code);
        let table = self
            .store
            .fetch_series(&code)
            .await?
            .ok_or_else(|| AnalysisError::NotFound(code.clone()))?;
        let series = normalize(&table)?;
        debug!("Loaded {} trading days for {}", series.len(), code);
        Ok(series)
    }

    /// Technical analysis for every window.
    pub async fn analyze(&self, code: &str) -> Result<AnalysisResult, AnalysisError> {
        let series = self.load(code).await?;
        Ok(self.analyze_series(&normalize_code(code), &series))
    }

    /// Technical analysis of an already normalized series.
    pub fn analyze_series(&self, code: &str, series: &PriceSeries) -> AnalysisResult {
        let per_window: BTreeMap<String, WindowAnalysis> = window::select(series, &WindowSpec::ALL)
            .into_iter()
            .map(|(spec, records)| {
                let bars = Bars::from_records(records);
                let indicators = self.engine.compute_battery(&bars, spec.size);
                let signal = classify_window(&indicators, bars.last_close());
                debug!(
                    "{} {}: {} bars, {} of {} indicators available, {}",
                    code,
                    spec.label,
                    bars.len(),
                    indicators.values().filter(|v| v.is_available()).count(),
                    indicators.len(),
                    signal
                );
                (spec.label.to_string(), WindowAnalysis { indicators, signal })
            })
            .collect();

        AnalysisResult {
            code: code.to_string(),
            per_window,
            historical_series: series.historical(),
        }
    }

    /// Turnover, volume and price-move statistics.
    pub async fn fundamentals(&self, code: &str) -> Result<FundamentalSummary, AnalysisError> {
        let series = self.load(code).await?;
        Ok(summarize(&normalize_code(code), &series))
    }

    /// Merge uploaded history into the stored blob.
    ///
    /// The upload must normalize on its own. Returns the stored row count.
    pub async fn ingest(&self, code: &str, table: RawTable) -> Result<usize, AnalysisError> {
        let code = normalize_code(code);
        let series = normalize(&table)?;
        let rows = self.store.merge(&code, table).await?;
        info!(
            "Ingested {} trading days for {}, {} rows stored",
            series.len(),
            code,
            rows
        );
        Ok(rows)
    }

    /// Latest trading date of every stock, grouped by date.
    ///
    /// Stocks are read concurrently. A stock that fails to load is reported
    /// in `errors` and does not abort the report.
    pub async fn freshness(&self) -> Result<FreshnessReport, AnalysisError> {
        let codes = self.store.list_codes().await?;
        info!("Checking freshness of {} stocks", codes.len());

        let loads = codes.iter().map(|code| async move {
            let latest = self
                .load(code)
                .await
                .map(|series| series.latest().map(|r| r.date));
            (code, latest)
        });

        let mut report = FreshnessReport::default();
        for (code, latest) in join_all(loads).await {
            match latest {
                Ok(Some(date)) => report.by_date.entry(date).or_default().push(code.clone()),
                Ok(None) => report.errors.push(FreshnessError {
                    code: code.clone(),
                    error: "no trading days".to_string(),
                }),
                Err(e) => {
                    warn!("Freshness check failed for {}: {}", code, e);
                    report.errors.push(FreshnessError {
                        code: code.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
