//! Core types for comment normalization.
//!
//! Defines the data structures used throughout the fix pipeline.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::converge::DEFAULT_MAX_PASSES;
use crate::error::FileError;

/// Statistic category of a rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FixCategory {
    /// `/ ===` → `// ===`
    SectionHeaders,
    /// `/ TITLE` → `// TITLE`
    SectionTitles,
    /// `/ Comment` → `// Comment`
    ObjectComments,
    /// Title line between two `//` dividers gains its `//`.
    MultilineSections,
    /// `TITLE` → `// TITLE`
    NakedHeaders,
    /// `===` → `// ===`
    SectionDividers,
    /// Single-slash dividers left over after title normalization.
    MixedSlashHeaders,
}

impl FixCategory {
    /// Number of categories.
    pub const COUNT: usize = 7;

    /// Every category, in report order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::SectionHeaders,
        Self::SectionTitles,
        Self::ObjectComments,
        Self::MultilineSections,
        Self::NakedHeaders,
        Self::SectionDividers,
        Self::MixedSlashHeaders,
    ];

    /// Stable snake_case name used in JSON output and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SectionHeaders => "section_headers",
            Self::SectionTitles => "section_titles",
            Self::ObjectComments => "object_comments",
            Self::MultilineSections => "multiline_sections",
            Self::NakedHeaders => "naked_headers",
            Self::SectionDividers => "section_dividers",
            Self::MixedSlashHeaders => "mixed_slash_headers",
        }
    }

    /// Human-readable label for reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SectionHeaders => "Section headers (/ === → // ===)",
            Self::SectionTitles => "Section titles (/ TITLE → // TITLE)",
            Self::ObjectComments => "Object comments (/ Comment → // Comment)",
            Self::MultilineSections => "Multiline sections (missing //)",
            Self::NakedHeaders => "Naked headers (TITLE → // TITLE)",
            Self::SectionDividers => "Section dividers (=== → // ===)",
            Self::MixedSlashHeaders => "Mixed slash headers",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FixCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substitution counts per category.
///
/// Every category is always present, so merging never needs existence
/// checks. Values are combined with `+` into new tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixTally {
    counts: [usize; FixCategory::COUNT],
}

impl FixTally {
    /// All-zero tally.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            counts: [0; FixCategory::COUNT],
        }
    }

    /// Tally with a single non-zero category.
    #[must_use]
    pub const fn single(category: FixCategory, count: usize) -> Self {
        let mut counts = [0; FixCategory::COUNT];
        counts[category.index()] = count;
        Self { counts }
    }

    /// Count for one category.
    #[must_use]
    pub const fn get(&self, category: FixCategory) -> usize {
        self.counts[category.index()]
    }

    /// Sum over all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// True when no substitution was recorded.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate `(category, count)` pairs in report order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (FixCategory, usize)> + '_ {
        FixCategory::ALL.iter().map(|&c| (c, self.get(c)))
    }

    /// Iterate only the categories with a non-zero count.
    pub fn nonzero(&self) -> impl Iterator<Item = (FixCategory, usize)> + '_ {
        self.iter().filter(|&(_, count)| count > 0)
    }
}

impl Add for FixTally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut counts = self.counts;
        for (slot, extra) in counts.iter_mut().zip(rhs.counts) {
            *slot += extra;
        }
        Self { counts }
    }
}

impl Sum for FixTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl FromIterator<(FixCategory, usize)> for FixTally {
    fn from_iter<I: IntoIterator<Item = (FixCategory, usize)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(category, count)| Self::single(category, count))
            .sum()
    }
}

impl fmt::Display for FixTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (category, count) in self.nonzero() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{category}={count}")?;
            first = false;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

impl Serialize for FixTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FixCategory::COUNT + 1))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.as_str(), &count)?;
        }
        map.serialize_entry("total", &self.total())?;
        map.end()
    }
}

/// Whether a run persists its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Write changed files back.
    Apply,
    /// Compute outcomes only (dry run).
    #[default]
    Preview,
}

impl RunMode {
    /// True for dry runs.
    #[must_use]
    pub const fn is_preview(self) -> bool {
        matches!(self, Self::Preview)
    }
}

/// Result of processing one file. Produced exactly once per file per run.
#[derive(Debug)]
pub enum FileOutcome {
    /// Content changed and was written back.
    Fixed {
        /// Substitutions made.
        tally: FixTally,
        /// The normalized content now on disk.
        content: String,
    },
    /// Content was already normalized.
    Unchanged,
    /// Preview mode: content would change.
    WouldFix {
        /// Substitutions that would be made.
        tally: FixTally,
    },
    /// Reading or writing failed; the file on disk is untouched.
    Error(FileError),
}

impl FileOutcome {
    /// Substitutions carried by this outcome (zero for `Unchanged`/`Error`).
    #[must_use]
    pub fn tally(&self) -> FixTally {
        match self {
            Self::Fixed { tally, .. } | Self::WouldFix { tally } => *tally,
            Self::Unchanged | Self::Error(_) => FixTally::zero(),
        }
    }

    /// True for `Error` outcomes.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Short status word for progress output.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Fixed { .. } => "fixed",
            Self::Unchanged => "unchanged",
            Self::WouldFix { .. } => "would fix",
            Self::Error(_) => "error",
        }
    }
}

/// Configuration for per-file processing.
///
/// Controls write mode, file size limits and the convergence cap.
#[derive(Debug, Clone)]
pub struct FixConfig {
    /// Apply or preview.
    pub mode: RunMode,
    /// Maximum file size in bytes (default 1MB).
    pub max_file_size: u64,
    /// Convergence cap: maximum full passes per file.
    pub max_passes: usize,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Preview, // Default to preview for safety
            max_file_size: 1024 * 1024,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}
