//! Report Aggregator - fold outcomes into a run summary.
//!
//! Purely additive: outcomes can be recorded as they stream in or folded in
//! one go with `summarize`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::types::{FileOutcome, FixCategory, FixTally, RunMode};

/// Default number of files listed under "Top Fixed Files".
pub const DEFAULT_TOP_FILES: usize = 10;

const RULE: &str = "================================================================================";

/// A file and how many substitutions it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedFile {
    /// File path as dispatched.
    pub path: PathBuf,
    /// Total substitutions.
    pub fixes: usize,
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    /// File path as dispatched.
    pub path: PathBuf,
    /// Rendered error message.
    pub message: String,
}

/// Aggregate of every outcome in a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Apply or preview.
    pub mode: RunMode,
    /// Files written back.
    pub files_fixed: usize,
    /// Files that would change (preview only).
    pub files_would_fix: usize,
    /// Files already normalized.
    pub files_unchanged: usize,
    /// Files that errored.
    pub files_errored: usize,
    /// Category-summed substitutions.
    pub totals: FixTally,
    /// Lines doubled by the force fallback (single-file runs only).
    pub standalone_slashes: usize,
    /// Highest fix counts first, ties broken by path.
    pub top_files: Vec<RankedFile>,
    /// Every failed file with its message, sorted by path.
    pub errors: Vec<FailedFile>,
    /// Wall time of the run in seconds.
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(elapsed: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(elapsed.as_secs_f64())
}

/// Incremental builder for `RunReport`.
#[derive(Debug)]
pub struct ReportBuilder {
    mode: RunMode,
    top_n: usize,
    files_fixed: usize,
    files_would_fix: usize,
    files_unchanged: usize,
    totals: FixTally,
    standalone_slashes: usize,
    changed: Vec<RankedFile>,
    errors: Vec<FailedFile>,
}

impl ReportBuilder {
    /// Start an empty report.
    #[must_use]
    pub const fn new(mode: RunMode, top_n: usize) -> Self {
        Self {
            mode,
            top_n,
            files_fixed: 0,
            files_would_fix: 0,
            files_unchanged: 0,
            totals: FixTally::zero(),
            standalone_slashes: 0,
            changed: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Fold one outcome in.
    pub fn record(&mut self, path: &Path, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Fixed { tally, .. } => {
                self.files_fixed += 1;
                self.add_changed(path, *tally);
            }
            FileOutcome::WouldFix { tally } => {
                self.files_would_fix += 1;
                self.add_changed(path, *tally);
            }
            FileOutcome::Unchanged => self.files_unchanged += 1,
            FileOutcome::Error(error) => self.errors.push(FailedFile {
                path: path.to_path_buf(),
                message: error.to_string(),
            }),
        }
    }

    /// Add lines doubled (or, in preview, doublable) by the force fallback.
    pub fn record_forced(&mut self, count: usize) {
        self.standalone_slashes += count;
    }

    fn add_changed(&mut self, path: &Path, tally: FixTally) {
        self.totals = self.totals + tally;
        self.changed.push(RankedFile {
            path: path.to_path_buf(),
            fixes: tally.total(),
        });
    }

    /// Outcomes recorded so far.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.files_fixed + self.files_would_fix + self.files_unchanged + self.errors.len()
    }

    /// Finalize once the scheduler is drained.
    #[must_use]
    pub fn finish(mut self, elapsed: Duration) -> RunReport {
        self.changed
            .sort_by(|a, b| b.fixes.cmp(&a.fixes).then_with(|| a.path.cmp(&b.path)));
        self.changed.truncate(self.top_n);
        self.errors.sort_by(|a, b| a.path.cmp(&b.path));

        RunReport {
            mode: self.mode,
            files_fixed: self.files_fixed,
            files_would_fix: self.files_would_fix,
            files_unchanged: self.files_unchanged,
            files_errored: self.errors.len(),
            totals: self.totals,
            standalone_slashes: self.standalone_slashes,
            top_files: self.changed,
            errors: self.errors,
            elapsed,
        }
    }
}

/// Fold a complete outcome sequence into a report.
pub fn summarize<I>(outcomes: I, mode: RunMode, top_n: usize, elapsed: Duration) -> RunReport
where
    I: IntoIterator<Item = (PathBuf, FileOutcome)>,
{
    let mut builder = ReportBuilder::new(mode, top_n);
    for (path, outcome) in outcomes {
        builder.record(&path, &outcome);
    }
    builder.finish(elapsed)
}

impl RunReport {
    /// Files that produced an outcome.
    #[must_use]
    pub const fn files_processed(&self) -> usize {
        self.files_fixed + self.files_would_fix + self.files_unchanged + self.files_errored
    }

    /// Catalog substitutions plus forced slash doublings.
    #[must_use]
    pub fn total_fixes(&self) -> usize {
        self.totals.total() + self.standalone_slashes
    }

    /// Render the human-readable summary.
    ///
    /// The error list is included only when `verbose` is set; the error
    /// count is always shown.
    #[must_use]
    pub fn render(&self, verbose: bool) -> String {
        SummaryView {
            report: self,
            verbose,
        }
        .to_string()
    }

    /// Serialize the report as pretty JSON.
    ///
    /// # Errors
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

struct SummaryView<'a> {
    report: &'a RunReport,
    verbose: bool,
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let preview = report.mode.is_preview();

        writeln!(f, "\n{RULE}")?;
        writeln!(f, "COMMENT FIXER SUMMARY")?;
        writeln!(f, "{RULE}")?;

        writeln!(f, "\nFiles:")?;
        writeln!(f, "  - Total processed: {}", report.files_processed())?;
        if preview {
            writeln!(f, "  - Files that would be fixed: {}", report.files_would_fix)?;
        } else {
            writeln!(f, "  - Files fixed: {}", report.files_fixed)?;
        }
        writeln!(f, "  - Files unchanged: {}", report.files_unchanged)?;
        writeln!(f, "  - Files with errors: {}", report.files_errored)?;

        writeln!(f, "\nFix Types:")?;
        for category in FixCategory::ALL {
            writeln!(f, "  - {}: {}", category.label(), report.totals.get(category))?;
        }
        if report.standalone_slashes > 0 {
            writeln!(f, "  - Standalone slashes: {}", report.standalone_slashes)?;
        }
        writeln!(f, "  - Total fixes: {}", report.total_fixes())?;

        if !report.top_files.is_empty() {
            let heading = if preview {
                "Top Files To Fix"
            } else {
                "Top Fixed Files"
            };
            writeln!(f, "\n{heading}:")?;
            for file in &report.top_files {
                writeln!(f, "  - {} ({} fixes)", file.path.display(), file.fixes)?;
            }
        }

        if self.verbose && !report.errors.is_empty() {
            writeln!(f, "\nFiles With Errors:")?;
            for failed in &report.errors {
                writeln!(f, "  - {}: {}", failed.path.display(), failed.message)?;
            }
        }

        writeln!(f, "\n{RULE}")?;
        if preview {
            writeln!(
                f,
                "DRY RUN: No files were modified. Run without --dry-run to apply changes."
            )?;
        } else {
            writeln!(
                f,
                "Successfully fixed {} files with {} comment issues.",
                report.files_fixed,
                report.total_fixes()
            )?;
        }
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "\nTotal execution time: {:.2} seconds",
            report.elapsed.as_secs_f64()
        )
    }
}
