//! Candidate file discovery for bulk rewriters.
//!
//! Walks a directory tree with `walkdir`, pruning excluded directories before
//! descending into them, and keeps files whose extension is wanted.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::IoError;

/// Options for file discovery.
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// File extensions to include (e.g., `["ts", ".tsx"]`); empty means all files.
    pub extensions: Vec<String>,
    /// Skip directories by name (e.g., `["target", "node_modules"]`)
    pub skip_dirs: Vec<String>,
    /// Skip hidden files and directories
    pub skip_hidden: bool,
    /// Follow symbolic links while walking
    pub follow_links: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            extensions: vec![".ts".to_string(), ".tsx".to_string()],
            skip_dirs: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "dist".to_string(),
                "build".to_string(),
                "target".to_string(),
            ],
            skip_hidden: false,
            follow_links: false,
        }
    }
}

/// Discover files recursively under `root` matching the configured extensions.
///
/// Results are sorted so repeated runs dispatch files in the same order.
/// Unreadable entries are logged and skipped.
///
/// # Errors
/// `IoError::NotFound` when `root` does not exist, `IoError::NotADirectory`
/// when it is not a directory.
pub fn discover_files(root: &Path, options: &DiscoverOptions) -> Result<Vec<PathBuf>, IoError> {
    if !root.exists() {
        return Err(IoError::NotFound(root.to_string_lossy().to_string()));
    }
    if !root.is_dir() {
        return Err(IoError::NotADirectory(root.to_string_lossy().to_string()));
    }

    let extensions: Vec<String> = options
        .extensions
        .iter()
        .map(|e| normalize_extension(e))
        .collect();

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(options.follow_links)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_pruned(entry, options))
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(error = %error, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matches_extension(entry.path(), &extensions))
        .map(DirEntry::into_path)
        .collect();

    files.sort();
    tracing::debug!(root = %root.display(), count = files.len(), "discovered files");
    Ok(files)
}

fn is_pruned(entry: &DirEntry, options: &DiscoverOptions) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };

    if options.skip_hidden && name.starts_with('.') {
        return true;
    }

    entry.file_type().is_dir() && options.skip_dirs.iter().any(|skip| skip == name)
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension().is_some_and(|ext| {
        let ext_with_dot = format!(".{}", ext.to_string_lossy().to_lowercase());
        extensions.contains(&ext_with_dot)
    })
}

/// Normalize extension to lowercase with dot prefix.
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
