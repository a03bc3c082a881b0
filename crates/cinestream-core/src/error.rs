use thiserror::Error;

/// Failure writing or exporting a local list. Reads never fail; see [`crate::ListStore::load`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}
