use thiserror::Error;

/// Validation and contract errors exposed by `assetlens-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid risk tolerance '{value}', expected one of conservative, moderate, aggressive")]
    InvalidRiskTolerance { value: String },
    #[error("invalid chart period '{value}', expected one of 7d, 30d")]
    InvalidChartPeriod { value: String },
    #[error("invalid asset type '{value}', expected one of stock, crypto, forex")]
    InvalidAssetType { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("trace_id must be 32 hex characters")]
    InvalidTraceId,
}

/// Failure of the concurrent analysis pipeline.
///
/// The scoring engine itself is total; the only way an analysis can fail is
/// the producer group running past its time budget.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("analysis of '{symbol}' exceeded its {timeout_ms}ms budget")]
    Timeout { symbol: String, timeout_ms: u64 },
}

/// History collaborator failures. Never fatal to an analysis.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history storage is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
