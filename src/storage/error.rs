use thiserror::Error;

/// Errors raised while writing persisted records.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Record encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("Storage lock poisoned")]
    Poisoned,
}
