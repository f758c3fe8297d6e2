use thiserror::Error;

/// Error type for the index, ingestion, and retrieval plumbing.
///
/// Scoring itself never surfaces these: the aggregator substitutes the
/// documented default for a failed signal and records a
/// `matching::SignalFailure` note instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] crate::embedding::EmbedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index snapshot error: {0}")]
    Persist(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
