//! Runtime settings loader for omni-comments.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/omni-dev-fusion/settings.yaml`
//!
//! Merge precedence is user over system. Only the `comment_fixer` section is
//! read; other sections of the shared settings file are ignored.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::converge::DEFAULT_MAX_PASSES;
use crate::error::SetupError;
use crate::report::DEFAULT_TOP_FILES;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "omni-dev-fusion/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
const MAX_PASSES_LIMIT: usize = 16;
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Top-level settings document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    /// The `comment_fixer` section.
    #[serde(default)]
    pub comment_fixer: CommentFixerSettings,
}

/// Optional overrides for a fixer run. `None` means "use the default".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentFixerSettings {
    /// Directory names pruned from traversal.
    pub exclude: Option<Vec<String>>,
    /// File extensions to process.
    pub extensions: Option<Vec<String>>,
    /// Worker pool size (0 = auto).
    pub workers: Option<usize>,
    /// Maximum file size in bytes.
    pub max_file_size: Option<u64>,
    /// Convergence cap.
    pub max_passes: Option<usize>,
    /// Files listed in the ranking.
    pub top_files: Option<usize>,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            comment_fixer: self.comment_fixer.merge(overlay.comment_fixer),
        }
    }
}

impl CommentFixerSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            exclude: overlay.exclude.or(self.exclude),
            extensions: overlay.extensions.or(self.extensions),
            workers: overlay.workers.or(self.workers),
            max_file_size: overlay.max_file_size.or(self.max_file_size),
            max_passes: overlay.max_passes.or(self.max_passes),
            top_files: overlay.top_files.or(self.top_files),
        }
    }

    /// Convergence cap after defaults and validation.
    ///
    /// # Errors
    /// `SetupError::InvalidSetting` for 0 or anything above the hard limit.
    pub fn resolved_max_passes(&self) -> Result<usize, SetupError> {
        let value = self.max_passes.unwrap_or(DEFAULT_MAX_PASSES);
        if value == 0 || value > MAX_PASSES_LIMIT {
            return Err(SetupError::InvalidSetting {
                key: "max_passes",
                reason: format!("expected 1..={MAX_PASSES_LIMIT}, got {value}"),
            });
        }
        Ok(value)
    }

    /// Ranking length after defaults.
    #[must_use]
    pub fn resolved_top_files(&self) -> usize {
        self.top_files.unwrap_or(DEFAULT_TOP_FILES)
    }
}

/// Load merged runtime settings (user overrides system).
pub fn load_runtime_settings() -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths();
    load_runtime_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> RuntimeSettings {
    if !path.exists() {
        return RuntimeSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return RuntimeSettings::default();
        }
    };
    if raw.trim().is_empty() {
        return RuntimeSettings::default();
    }
    match serde_yaml::from_str::<Option<RuntimeSettings>>(&raw) {
        Ok(value) => value.unwrap_or_default(),
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            RuntimeSettings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
