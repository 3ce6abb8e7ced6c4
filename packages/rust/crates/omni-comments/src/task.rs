//! File Task Runner - normalize one file and settle its outcome.
//!
//! Every failure is captured in the returned `FileOutcome`; nothing here
//! returns early through `?` to the batch.

use std::path::Path;

use omni_io::IoError;

use crate::converge::normalize;
use crate::error::FileError;
use crate::types::{FileOutcome, FixConfig};

/// Strategy for replacing a file's content.
///
/// Implementations must leave the destination untouched when they fail.
pub trait Persist: Send + Sync {
    /// Replace the content of `path`.
    ///
    /// # Errors
    /// Any I/O failure; the original file must still be intact.
    fn persist(&self, path: &Path, content: &str) -> Result<(), IoError>;
}

/// Temp-file-then-rename writes via `omni_io::write_text_atomic`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AtomicPersist;

impl Persist for AtomicPersist {
    fn persist(&self, path: &Path, content: &str) -> Result<(), IoError> {
        omni_io::write_text_atomic(path, content)
    }
}

/// Process one file with atomic writes.
pub fn process_file(path: &Path, config: &FixConfig) -> FileOutcome {
    process_file_with(path, config, &AtomicPersist)
}

/// Process one file with an explicit write strategy.
///
/// Preview mode never calls `persist`. Content that normalizes to itself is
/// always `Unchanged`, whatever the mode.
pub fn process_file_with<P: Persist + ?Sized>(
    path: &Path,
    config: &FixConfig,
    persist: &P,
) -> FileOutcome {
    let content = match omni_io::read_text_safe(path, config.max_file_size) {
        Ok(content) => content,
        Err(error) => {
            let error = FileError::Read(error);
            tracing::warn!(path = %path.display(), error = %error, "skipping file");
            return FileOutcome::Error(error);
        }
    };

    let result = normalize(&content, config.max_passes);
    if !result.converged {
        tracing::warn!(
            path = %path.display(),
            passes = result.passes,
            "pass cap reached before a fixed point"
        );
    }

    if result.text == content {
        tracing::debug!(path = %path.display(), "already normalized");
        return FileOutcome::Unchanged;
    }

    if config.mode.is_preview() {
        tracing::debug!(path = %path.display(), fixes = %result.tally, "would fix");
        return FileOutcome::WouldFix {
            tally: result.tally,
        };
    }

    if let Err(error) = persist.persist(path, &result.text) {
        let error = FileError::Write(error);
        tracing::warn!(path = %path.display(), error = %error, "write failed; original kept");
        return FileOutcome::Error(error);
    }

    tracing::debug!(path = %path.display(), fixes = %result.tally, "fixed");
    FileOutcome::Fixed {
        tally: result.tally,
        content: result.text,
    }
}
