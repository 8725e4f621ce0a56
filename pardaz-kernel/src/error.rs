//! Kernel error types.

use pardaz_api::PageId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout of {page} changed concurrently (expected version {expected}, found {actual})")]
    Conflict {
        page: PageId,
        expected: u64,
        actual: u64,
    },
}

/// Failures of a configuration sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sink unavailable: {0}")]
    Unavailable(String),
}
