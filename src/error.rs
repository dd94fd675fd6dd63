//! Error types for codex operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or reading a book.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read content root {}: {source}", .path.display())]
    ContentRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("cannot read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
