use blobaudit_storage::StorageError;
use thiserror::Error;

/// Failure of a single ingest invocation
#[derive(Error, Debug)]
pub enum Fault {
    /// Required configuration is missing; the store was never contacted
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] StorageError),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl Fault {
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::Config(_) => "config",
            Fault::Store(_) => "store",
            Fault::Unexpected(_) => "unexpected",
        }
    }
}

impl From<blobaudit_core::Error> for Fault {
    fn from(err: blobaudit_core::Error) -> Self {
        Fault::Unexpected(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Fault>;
