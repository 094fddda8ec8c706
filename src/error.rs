//! Error types for filekv
//!
//! Provides a unified error type for all store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using FileKvError
pub type Result<T> = std::result::Result<T, FileKvError>;

/// Unified error type for filekv operations
#[derive(Debug, Error)]
pub enum FileKvError {
    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    /// Any call made after `close()`, including a second `close()`
    #[error("store already closed")]
    Closed,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    /// The backing file could not be opened for reading (load) or writing (persist)
    #[error("failed to open file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding succeeded but the bytes could not be flushed or synced
    #[error(
        "failed to flush file {}; data might not have been fully persisted to disk: {source}",
        path.display()
    )]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary snapshot could not be renamed over the target
    #[error("failed to replace snapshot file {}: {source}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    /// The existing file is not a JSON object of string keys to string values
    #[error("failed to decode data in {} as JSON: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode data as JSON: {0}")]
    Encode(#[source] serde_json::Error),

    // -------------------------------------------------------------------------
    // Host Errors
    // -------------------------------------------------------------------------
    #[error("host error: {0}")]
    Host(String),
}
