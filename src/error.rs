//! Error types for catalog loading and preference persistence

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StylistError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate item id in catalog: {0}")]
    DuplicateItem(String),
    #[error("unknown item id: {0}")]
    UnknownItem(String),
}

pub type Result<T> = std::result::Result<T, StylistError>;
