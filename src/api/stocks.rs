//! Stock analysis API endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::services::analyzer::AnalysisError;
use crate::types::{
    normalize_code, AnalysisResult, FreshnessReport, FundamentalSummary, RawTable, StockIdentity,
};
use crate::AppState;

/// API response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMeta {
    pub generated_at: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta {
                generated_at: Utc::now(),
            },
        }
    }
}

/// Result of a history upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    pub code: String,
    pub rows: usize,
}

/// Create the stocks router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks))
        .route("/freshness", get(get_freshness))
        .route("/:code/technical-analysis", get(get_technical_analysis))
        .route("/:code/fundamental-analysis", get(get_fundamental_analysis))
        .route("/:code/history", put(put_history))
}

/// GET /api/stocks
async fn list_stocks(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<StockIdentity>>>> {
    let store = state.analyzer.store();
    let stocks = store
        .list_codes()
        .await?
        .iter()
        .map(|code| StockIdentity::new(code, store.key_prefix()))
        .collect();
    Ok(Json(ApiResponse::new(stocks)))
}

/// GET /api/stocks/freshness
async fn get_freshness(State(state): State<AppState>) -> Result<Json<ApiResponse<FreshnessReport>>> {
    let report = state.analyzer.freshness().await?;
    Ok(Json(ApiResponse::new(report)))
}

/// GET /api/stocks/:code/technical-analysis
async fn get_technical_analysis(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<AnalysisResult>>> {
    let result = state.analyzer.analyze(&code).await?;
    Ok(Json(ApiResponse::new(result)))
}

/// GET /api/stocks/:code/fundamental-analysis
async fn get_fundamental_analysis(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<FundamentalSummary>>> {
    let summary = state.analyzer.fundamentals(&code).await?;
    Ok(Json(ApiResponse::new(summary)))
}

/// PUT /api/stocks/:code/history
///
/// Body is CSV in the exchange export layout, newest rows first.
async fn put_history(
    State(state): State<AppState>,
    Path(code): Path<String>,
    body: String,
) -> Result<Json<ApiResponse<IngestResponse>>> {
    if body.trim().is_empty() {
        return Err(AppError::BadRequest("empty CSV body".to_string()));
    }
    let table = RawTable::from_csv(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    debug!("Received {} rows for {}", table.len(), code);

    let rows = state
        .analyzer
        .ingest(&code, table)
        .await
        .map_err(|e| match e {
            AnalysisError::Malformed(e) => AppError::BadRequest(e.to_string()),
            other => other.into(),
        })?;
    Ok(Json(ApiResponse::new(IngestResponse {
        code: normalize_code(&code),
        rows,
    })))
}
