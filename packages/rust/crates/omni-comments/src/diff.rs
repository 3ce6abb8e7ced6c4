//! Diff generation utilities.
//!
//! Renders normalization previews as unified diffs using the `similar` crate.

use similar::TextDiff;

/// Generate a unified diff between two strings.
///
/// Hunks carry three lines of context and `@@` range headers; `label` names
/// the file in the `---`/`+++` header. Identical inputs yield an empty string.
#[must_use]
pub fn generate_unified_diff(original: &str, modified: &str, label: &str) -> String {
    if original == modified {
        return String::new();
    }

    TextDiff::from_lines(original, modified)
        .unified_diff()
        .context_radius(3)
        .missing_newline_hint(false)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}
