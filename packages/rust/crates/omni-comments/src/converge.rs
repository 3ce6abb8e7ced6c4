//! Convergence Driver - repeat passes until a fixed point or the cap.
//!
//! Regex rules cannot be proven confluent in general, so the number of passes
//! is bounded. With the shipped catalog a fixed point is reached within three
//! passes: the first settles every single-line rule, the second catches
//! sections whose dividers only became `//` dividers late in the first pass.

use crate::pass::apply_once;
use crate::types::FixTally;

/// Default cap on full passes per file.
pub const DEFAULT_MAX_PASSES: usize = 3;

/// Result of normalizing one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Final text.
    pub text: String,
    /// Sum of the per-pass tallies.
    pub tally: FixTally,
    /// Passes executed, including the final zero pass when converged.
    pub passes: usize,
    /// True when the last pass made no substitution.
    pub converged: bool,
}

impl Normalized {
    /// True when the text differs from the input.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.tally.is_zero()
    }
}

/// Normalize text with the catalog, running at most `max_passes` passes.
///
/// A cap of zero is treated as one pass.
#[must_use]
pub fn normalize(text: &str, max_passes: usize) -> Normalized {
    let max_passes = max_passes.max(1);
    let mut current = text.to_string();
    let mut tally = FixTally::zero();

    for pass in 1..=max_passes {
        let (next, pass_tally) = apply_once(&current);
        if pass_tally.is_zero() {
            return Normalized {
                text: current,
                tally,
                passes: pass,
                converged: true,
            };
        }
        current = next;
        tally = tally + pass_tally;
    }

    Normalized {
        text: current,
        tally,
        passes: max_passes,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FixCategory;

    #[test]
    fn test_clean_text_single_pass() {
        let result = normalize("// fine\n", DEFAULT_MAX_PASSES);
        assert_eq!(result.passes, 1);
        assert!(result.converged);
        assert!(!result.changed());
    }

    #[test]
    fn test_late_dividers_need_second_pass() {
        // Bare dividers only become `//` dividers after the section rule ran.
        let result = normalize("===\nTITLE\n===\n", DEFAULT_MAX_PASSES);
        assert_eq!(result.text, "// ===\n// TITLE\n// ===\n");
        assert_eq!(result.tally.get(FixCategory::SectionDividers), 2);
        assert_eq!(result.tally.get(FixCategory::MultilineSections), 1);
        assert_eq!(result.passes, 3);
        assert!(result.converged);
    }

    #[test]
    fn test_cap_is_respected() {
        let result = normalize("===\nTITLE\n===\n", 1);
        assert_eq!(result.passes, 1);
        assert!(!result.converged);
        assert_eq!(result.text, "// ===\nTITLE\n// ===\n");
    }

    #[test]
    fn test_zero_cap_runs_one_pass() {
        let result = normalize("=====\n", 0);
        assert_eq!(result.text, "// =====\n");
        assert_eq!(result.passes, 1);
    }
}
