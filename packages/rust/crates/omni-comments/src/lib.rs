#![allow(clippy::doc_markdown)]

//! omni-comments - Comment Syntax Repair for Omni DevEnv
//!
//! Deterministic, convergent bulk repair of malformed comment syntax:
//! single-slash comments, `//`-less section titles and naked banners.
//! Text-level rewriting only; no syntax tree is ever built.
//!
//! # Features
//!
//! - **Pattern Catalog**: Ordered, named rewrite rules compiled once
//! - **Convergence**: Passes repeat until a fixed point, with a hard cap
//! - **Preview / Apply**: Dry runs never write; applies are atomic per file
//! - **Batch Processing**: Parallel per-file execution on a rayon pool
//! - **Reports**: Per-category tallies, top fixed files, JSON output
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-comments/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # SetupError, FileError (thiserror)
//! ├── types.rs    # FixCategory, FixTally, FileOutcome, FixConfig
//! ├── catalog.rs  # Ordered rewrite rules
//! ├── pass.rs     # One pass over the catalog
//! ├── converge.rs # Fixed-point driver with pass cap
//! ├── task.rs     # Per-file runner, Persist strategy
//! ├── force.rs    # Blunt single-file fallback
//! ├── batch.rs    # Parallel scheduler (rayon)
//! ├── report.rs   # Aggregation and rendering
//! ├── diff.rs     # Unified diff preview
//! └── settings.rs # YAML settings (system + user)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_comments::{normalize, BatchScheduler, FixConfig, summarize};
//!
//! // Single text
//! let result = normalize("/ === SECTION ===\n", 3);
//! assert_eq!(result.text, "// === SECTION ===\n");
//!
//! // Whole tree, preview only
//! let paths = omni_io::discover_files(root, &Default::default())?;
//! let run = BatchScheduler::new(0).run(paths, &FixConfig::default())?;
//! let report = summarize(run, config.mode, 10, started.elapsed());
//! println!("{}", report.render(false));
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod batch;
mod catalog;
mod converge;
mod diff;
mod error;
mod force;
mod pass;
mod report;
mod settings;
mod task;
mod types;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use catalog::{CATALOG_VERSION, RewriteRule, TRAILING_CONTEXT_GROUP, rules};
pub use converge::{DEFAULT_MAX_PASSES, Normalized, normalize};
pub use error::{FileError, SetupError};
pub use pass::{apply_once, apply_rule, apply_rules};
pub use types::{FileOutcome, FixCategory, FixConfig, FixTally, RunMode};

// Per-file and batch execution
pub use batch::{BatchRun, BatchScheduler};
pub use force::{force_double_slashes, force_file};
pub use task::{AtomicPersist, Persist, process_file, process_file_with};

// Reporting
pub use report::{DEFAULT_TOP_FILES, FailedFile, RankedFile, ReportBuilder, RunReport, summarize};

// Settings
pub use settings::{
    CommentFixerSettings, RuntimeSettings, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};

// Re-export diff utility for external use
pub use diff::generate_unified_diff;
