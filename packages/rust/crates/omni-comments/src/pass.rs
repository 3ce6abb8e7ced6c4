//! Pass Engine - one ordered application of the catalog.
//!
//! Pure text in, text out. No I/O and no shared mutable state, so any number
//! of workers can call it concurrently.

use crate::catalog::{RewriteRule, TRAILING_CONTEXT_GROUP, rules};
use crate::types::FixTally;

/// Apply every catalog rule once, in order.
///
/// Each rule operates on the output of the previous one. Returns the new
/// text and the number of replacements made per category.
#[must_use]
pub fn apply_once(text: &str) -> (String, FixTally) {
    apply_rules(text, rules())
}

/// Apply an explicit rule list once, in order.
#[must_use]
pub fn apply_rules(text: &str, rules: &[RewriteRule]) -> (String, FixTally) {
    let mut current = text.to_string();
    let mut counts = Vec::with_capacity(rules.len());

    for rule in rules {
        let (next, count) = apply_rule(&current, rule);
        if count > 0 {
            current = next;
        }
        counts.push((rule.category, count));
    }

    (current, counts.into_iter().collect())
}

/// Replace every non-overlapping match of one rule.
///
/// Trailing context (the `next` group) is left in place and searched again,
/// which keeps chained sections like `D T D T D` from hiding every second
/// title.
#[must_use]
pub fn apply_rule(text: &str, rule: &RewriteRule) -> (String, usize) {
    let mut output = String::with_capacity(text.len() + 16);
    let mut copied = 0;
    let mut search_at = 0;
    let mut count = 0;

    while search_at <= text.len() {
        let Some(caps) = rule.pattern.captures_at(text, search_at) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };

        let consumed_end = caps
            .name(TRAILING_CONTEXT_GROUP)
            .map_or(whole.end(), |ctx| ctx.start());

        output.push_str(&text[copied..whole.start()]);
        caps.expand(rule.replacement, &mut output);
        copied = consumed_end;
        count += 1;

        search_at = if consumed_end > whole.start() {
            consumed_end
        } else {
            // Empty consumption: step over one char to guarantee progress.
            match text[whole.start()..].chars().next() {
                Some(ch) => {
                    output.push(ch);
                    copied = whole.start() + ch.len_utf8();
                    copied
                }
                None => break,
            }
        };
    }

    if count == 0 {
        return (text.to_string(), 0);
    }

    output.push_str(&text[copied..]);
    (output, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FixCategory;

    #[test]
    fn test_plain_rule_counts_matches() {
        let rule = RewriteRule::new(FixCategory::SectionDividers, r"(?m)^=+$", "// ${0}").unwrap();
        let (out, count) = apply_rule("==\nx\n===\n", &rule);
        assert_eq!(out, "// ==\nx\n// ===\n");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_trailing_context_is_rescanned() {
        let rule = RewriteRule::new(
            FixCategory::MultilineSections,
            r"(?m)^(D\n)(T\n)(?P<next>D)$",
            "${1}// ${2}",
        )
        .unwrap();
        let (out, count) = apply_rule("D\nT\nD\nT\nD\n", &rule);
        assert_eq!(out, "D\n// T\nD\n// T\nD\n");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_empty_match_makes_progress() {
        let rule = RewriteRule::new(FixCategory::NakedHeaders, r"(?m)^", "> ").unwrap();
        let (out, count) = apply_rule("a\nb", &rule);
        assert_eq!(out, "> a\n> b");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_rules_compose_sequentially() {
        // The divider rule doubles the slashes the section rule depends on.
        let (out, tally) = apply_once("/ ===\nAB\n/ ===\n");
        assert_eq!(out, "// ===\n// AB\n// ===\n");
        assert_eq!(tally.get(FixCategory::SectionHeaders), 2);
        assert_eq!(tally.get(FixCategory::MultilineSections), 1);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_no_match_returns_input() {
        let (out, tally) = apply_once("const x = a / b;\n");
        assert_eq!(out, "const x = a / b;\n");
        assert!(tally.is_zero());
    }
}
