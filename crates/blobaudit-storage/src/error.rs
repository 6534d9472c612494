//! Error types for blobaudit-storage

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection string is not configured")]
    NotConfigured,

    #[error("Timed out connecting to audit store after {0}s")]
    ConnectTimeout(u64),
}
