//! Synchronous file I/O operations.
//!
//! Reads are size- and content-checked; writes go through a temp file in the
//! destination directory and are renamed into place.

use std::fs as std_fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::detect::decode_buffer;
use crate::error::IoError;

/// Read text from a file with size and binary checks (synchronous).
///
/// # Arguments
/// * `path` - Path to the file
/// * `max_bytes` - Maximum file size in bytes
///
/// # Returns
/// Decoded text content or an error.
///
/// # Example
///
/// ```rust,ignore
/// use omni_io::read_text_safe;
///
/// let content = read_text_safe("README.md", 1024 * 1024)?;
/// ```
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path)
        .map_err(|_| IoError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer)?;

    decode_buffer(buffer)
}

/// Write text content atomically:
/// - write to a temp file in the same directory
/// - copy the destination's permissions when it already exists
/// - fsync file + rename into place
///
/// A symlinked destination is resolved first: the link stays in place and its
/// target receives the new content. A path that does not exist yet is used
/// as given.
///
/// On any failure the temp file is removed and the destination is left as it
/// was. Readers only ever observe the old or the new content.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    let path = path.as_ref();
    let target = resolve_destination(path);
    let temp_path = temp_path_for(&target);

    let result = write_and_rename(&target, &temp_path, content);
    if result.is_err()
        && temp_path.exists()
        && let Err(error) = std_fs::remove_file(&temp_path)
    {
        tracing::warn!(
            path = %temp_path.display(),
            error = %error,
            "failed to remove temporary file after aborted write"
        );
    }
    result
}

fn write_and_rename(path: &Path, temp_path: &Path, content: &str) -> Result<(), IoError> {
    let mut temp_file = std_fs::File::create(temp_path)?;
    temp_file.write_all(content.as_bytes())?;

    if let Ok(metadata) = std_fs::metadata(path) {
        temp_file.set_permissions(metadata.permissions())?;
    }

    temp_file.sync_all()?;
    drop(temp_file);

    std_fs::rename(temp_path, path)?;
    Ok(())
}

fn resolve_destination(path: &Path) -> PathBuf {
    std_fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("file");
    parent.join(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()))
}
