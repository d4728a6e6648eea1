pub mod analyzer;
pub mod fundamentals;
pub mod normalizer;
pub mod signals;
pub mod storage;
pub mod window;

pub use analyzer::{AnalysisError, StockAnalyzer};
pub use normalizer::{normalize, NormalizationError};
pub use signals::IndicatorEngine;
pub use storage::{BlobStore, StoreError};
