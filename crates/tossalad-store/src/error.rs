use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("fixture file not found: {0}")]
    FixtureNotFound(std::path::PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fetch failed: {0}")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("malformed store response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),
}
