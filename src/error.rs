//! Error types for store operations.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnapError>;

/// Fatal errors. Every variant aborts the current command with exit code 1.
///
/// File-level copy failures are not errors; they end up in
/// [`CopyReport::skipped`](crate::tree::CopyReport) instead.
#[derive(Debug, Error)]
pub enum SnapError {
    #[error("could not create store {}: {source}", path.display())]
    StoreCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no snapshots (store {} does not exist)", .0.display())]
    NoStore(PathBuf),

    #[error("snapshot #{0} does not exist")]
    NotFound(u64),

    #[error("could not create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record {}: {reason}", path.display())]
    Record { path: PathBuf, reason: String },

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("could not run {program}: {source}")]
    Diff {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store is locked by another invocation ({})", .0.display())]
    Locked(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SnapError {
    pub fn record(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Record {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
