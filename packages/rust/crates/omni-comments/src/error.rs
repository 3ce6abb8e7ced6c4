//! Error types for comment normalization.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.
//!
//! Two tiers: `SetupError` stops a run before any file is touched,
//! `FileError` is captured in a single file's outcome and never propagates.

use std::path::PathBuf;

use omni_io::IoError;
use thiserror::Error;

/// Failures that prevent a run from starting.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Input path does not exist.
    #[error("Input path not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Traversal finished without a single candidate file.
    #[error("No files discovered under {}", .0.display())]
    NoFilesDiscovered(PathBuf),

    /// Directory traversal failed.
    #[error("Discovery error: {0}")]
    Discovery(#[from] IoError),

    /// The worker pool could not be built.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// A settings value is out of range.
    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting {
        /// Settings key as written in YAML.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Failure while processing one file; recorded in its outcome.
#[derive(Error, Debug)]
pub enum FileError {
    /// Reading or decoding the file failed.
    #[error("read failed: {0}")]
    Read(#[source] IoError),

    /// Writing the normalized content back failed. The original is intact.
    #[error("write failed: {0}")]
    Write(#[source] IoError),
}
