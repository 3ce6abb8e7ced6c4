//! Pattern Catalog - the ordered rewrite rules.
//!
//! Rules run in catalog order and each one sees the output of the previous
//! rule. Order is part of the contract: the multiline section rule only
//! recognizes dividers that the header rule has already doubled, and the
//! last rule sweeps dividers exposed by title normalization.
//!
//! Every pattern runs in CRLF-aware multiline mode (`(?mR)`), so `^`/`$`
//! anchor at line boundaries for both `\n` and `\r\n` files.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::FixCategory;

/// Revision of the rule set. Bump when a rule is added or changed.
pub const CATALOG_VERSION: &str = "2";

/// Capture group name marking trailing context.
///
/// Text matched by this group must be present for the rule to fire but is
/// neither replaced nor consumed: the next search resumes at its start.
pub const TRAILING_CONTEXT_GROUP: &str = "next";

/// One named rewrite rule.
#[derive(Debug)]
pub struct RewriteRule {
    /// Statistic category; also the rule's identity.
    pub category: FixCategory,
    /// Match pattern.
    pub pattern: Regex,
    /// Replacement template (`${1}` style group references).
    pub replacement: &'static str,
}

impl RewriteRule {
    /// Compile a rule.
    ///
    /// # Errors
    /// Returns the regex compilation error for an invalid pattern.
    pub fn new(
        category: FixCategory,
        pattern: &str,
        replacement: &'static str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            category,
            pattern: Regex::new(pattern)?,
            replacement,
        })
    }
}

/// Line-leading single `/` before a run of `=`.
const SLASHED_DIVIDER: &str = r"(?mR)^([ \t]*)/([ \t]*=+)";
/// Line-leading single `/` before an ALL-CAPS title filling the line.
const SLASHED_TITLE: &str = r"(?mR)^([ \t]*)/([ \t]+[A-Z][A-Z0-9 _-]*)$";
/// Line-leading single `/` before a word.
const SLASHED_COMMENT: &str = r"(?mR)^([ \t]*)/([ \t]+[A-Za-z])";
/// `//` divider, bare ALL-CAPS title, `//` divider (trailing context).
const BARE_SECTION_TITLE: &str = r"(?mR)^([ \t]*//[ \t]*=+[ \t]*\r?\n)([ \t]*)([A-Z][A-Z0-9 _-]*\r?\n)(?P<next>[ \t]*//[ \t]*=+[ \t]*)$";
/// Unindented bare ALL-CAPS line of at least six characters.
const NAKED_HEADER: &str = r"(?mR)^[A-Z][A-Z0-9 _-]{5,}$";
/// Line made only of `=`.
const NAKED_DIVIDER: &str = r"(?mR)^=+[ \t]*$";

static CATALOG: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    [
        (FixCategory::SectionHeaders, SLASHED_DIVIDER, "${1}//${2}"),
        (FixCategory::SectionTitles, SLASHED_TITLE, "${1}//${2}"),
        (FixCategory::ObjectComments, SLASHED_COMMENT, "${1}//${2}"),
        (
            FixCategory::MultilineSections,
            BARE_SECTION_TITLE,
            "${1}${2}// ${3}",
        ),
        (FixCategory::NakedHeaders, NAKED_HEADER, "// ${0}"),
        (FixCategory::SectionDividers, NAKED_DIVIDER, "// ${0}"),
        (FixCategory::MixedSlashHeaders, SLASHED_DIVIDER, "${1}//${2}"),
    ]
    .into_iter()
    .map(|(category, pattern, replacement)| compile_rule(category, pattern, replacement))
    .collect()
});

/// Compile a catalog rule; a pattern that fails to compile is logged and
/// replaced by one that never matches, so its category always counts zero.
fn compile_rule(category: FixCategory, pattern: &str, replacement: &'static str) -> RewriteRule {
    match RewriteRule::new(category, pattern, replacement) {
        Ok(rule) => rule,
        Err(error) => {
            tracing::error!(category = %category, error = %error, "rewrite pattern failed to compile");
            RewriteRule {
                category,
                pattern: never_matching(),
                replacement,
            }
        }
    }
}

fn never_matching() -> Regex {
    match Regex::new(r"\b\B") {
        Ok(regex) => regex,
        Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
    }
}

/// The ordered rule set, compiled on first use and shared read-only.
#[must_use]
pub fn rules() -> &'static [RewriteRule] {
    &CATALOG
}
