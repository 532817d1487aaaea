//! Per-item error taxonomy for batch operations.
//!
//! Batch flows (upload, note import) report one outcome per file and keep
//! going; these variants are what ends up in those reports. Singular
//! operations stay on `anyhow` with context labels.

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("remote store is not configured (run `blobdock login --url ... --token ...`)")]
    NotConfigured,

    #[error("{pathname} is {size} bytes (limit {limit})")]
    SizeLimit {
        pathname: String,
        size: u64,
        limit: u64,
    },

    #[error("remote store request failed: {0}")]
    Remote(String),

    #[error("local file not found: {0}")]
    NotFound(String),

    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Remote(format!("{:#}", err))
    }
}
