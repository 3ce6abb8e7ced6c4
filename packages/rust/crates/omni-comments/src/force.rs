//! Force fallback - blunt slash doubling outside the catalog.
//!
//! Doubles every line-leading single `/`. Not idempotent in spirit (it does
//! not understand dividers or titles), but it never turns `//` into `///`.

use std::path::Path;

use crate::error::FileError;
use crate::types::FixConfig;

/// Double the slash of every line that starts with `/` but not `//`.
///
/// Returns the new text and the number of lines changed. Line endings are
/// preserved.
#[must_use]
pub fn force_double_slashes(text: &str) -> (String, usize) {
    let mut output = String::with_capacity(text.len() + 16);
    let mut count = 0;

    for line in text.split_inclusive('\n') {
        if line.starts_with('/') && !line.starts_with("//") {
            output.push('/');
            count += 1;
        }
        output.push_str(line);
    }

    (output, count)
}

/// Apply the force fallback to one file.
///
/// In preview mode only the count is returned.
///
/// # Errors
/// `FileError::Read` or `FileError::Write`; on write failure the file is
/// left untouched.
pub fn force_file(path: &Path, config: &FixConfig) -> Result<usize, FileError> {
    let content =
        omni_io::read_text_safe(path, config.max_file_size).map_err(FileError::Read)?;
    let (forced, count) = force_double_slashes(&content);

    if count > 0 && !config.mode.is_preview() {
        omni_io::write_text_atomic(path, &forced).map_err(FileError::Write)?;
        tracing::info!(path = %path.display(), count, "applied forced slash doubling");
    }

    Ok(count)
}
