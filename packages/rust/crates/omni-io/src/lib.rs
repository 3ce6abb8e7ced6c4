#![allow(clippy::doc_markdown)]

//! omni-io - Safe and efficient file I/O for Omni DevEnv
//!
//! File reading, atomic writing and source discovery for bulk rewriters.
//!
//! # Features
//!
//! - **Safety**: Binary detection, strict UTF-8 & size limits
//! - **Atomic writes**: Temp file + fsync + rename, never a half-written file
//! - **Discovery**: Extension filtering with excluded directories pruned
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── detect.rs   # Binary detection & decoding
//! ├── sync.rs     # Read / atomic write API
//! └── discover.rs # Source file discovery (walkdir)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_io::{read_text_safe, write_text_atomic};
//!
//! let content = read_text_safe("file.ts", 1024 * 1024)?;
//! write_text_atomic("file.ts", &content.replace("/ ===", "// ==="))?;
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod detect;
mod discover;
mod error;
mod sync;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use discover::{DiscoverOptions, discover_files, normalize_extension};
pub use error::IoError;
pub use sync::{read_text_safe, write_text_atomic};

// Re-export detection utilities for advanced use
pub use detect::{decode_buffer, is_binary};
