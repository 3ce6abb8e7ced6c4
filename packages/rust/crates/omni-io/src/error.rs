//! Error types for file I/O operations.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.
//!
//! Read-side variants (`TooLarge`, `BinaryFile`, `Encoding`) mean the file
//! was rejected before any rewrite was attempted.

use thiserror::Error;

/// Failure while reading, writing or discovering source files.
#[derive(Error, Debug)]
pub enum IoError {
    /// Path does not exist (file to read, or discovery root).
    #[error("File not found: {0}")]
    NotFound(String),

    /// Discovery root exists but is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// File exceeds the configured size limit: (actual, limit).
    #[error("File too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// NUL byte in the leading 8KB.
    #[error("Binary file detected")]
    BinaryFile,

    /// Underlying `std::io` failure (open, read, temp write, rename).
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),

    /// Content is not valid UTF-8; carries the offset of the first bad byte.
    #[error("UTF-8 decoding error at byte {0}")]
    Encoding(usize),
}
