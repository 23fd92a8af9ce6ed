use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("`{command}` failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("defect ledger not found at {0} (run `deploy` first)")]
    LedgerNotFound(PathBuf),

    #[error("invalid defect ledger at {path}: {source}")]
    LedgerFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
