//! Property tests for the convergence driver.

use proptest::prelude::*;

use omni_comments::{DEFAULT_MAX_PASSES, FixTally, apply_once, normalize};

/// Lines typical of a TypeScript file with broken comment banners.
fn messy_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/ === SECTION ===".to_string()),
        Just("/ ===".to_string()),
        Just("// ===".to_string()),
        Just("=====".to_string()),
        Just("===   ".to_string()),
        Just("TITLE".to_string()),
        Just("  TITLE".to_string()),
        Just("EXPORTED API".to_string()),
        Just("/ CONFIGURATION".to_string()),
        Just("  / Some comment".to_string()),
        Just("// fine".to_string()),
        Just("const a = b / c;".to_string()),
        Just(String::new()),
        "[A-Za-z /=_-]{0,16}",
    ]
}

fn messy_text() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(messy_line(), 0..24),
        prop::bool::ANY,
        prop::bool::ANY,
    )
        .prop_map(|(lines, crlf, trailing)| {
            let eol = if crlf { "\r\n" } else { "\n" };
            let mut text = lines.join(eol);
            if trailing {
                text.push_str(eol);
            }
            text
        })
}

fn clean_text() -> impl Strategy<Value = String> {
    prop::collection::vec("(// [a-z ]{0,20}|[a-z(); ]{0,20})", 0..24)
        .prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn prop_converges_within_default_cap(text in messy_text()) {
        let result = normalize(&text, DEFAULT_MAX_PASSES);
        prop_assert!(result.converged);
        prop_assert!(result.passes <= DEFAULT_MAX_PASSES);
    }

    #[test]
    fn prop_normalize_is_idempotent(text in messy_text()) {
        let once = normalize(&text, DEFAULT_MAX_PASSES);
        let twice = normalize(&once.text, DEFAULT_MAX_PASSES);
        prop_assert_eq!(&twice.text, &once.text);
        prop_assert!(twice.tally.is_zero());
        prop_assert_eq!(twice.passes, 1);
    }

    #[test]
    fn prop_clean_text_is_untouched(text in clean_text()) {
        let result = normalize(&text, DEFAULT_MAX_PASSES);
        prop_assert_eq!(&result.text, &text);
        prop_assert!(result.tally.is_zero());
    }

    #[test]
    fn prop_tally_is_sum_of_passes(text in messy_text(), cap in 1usize..5) {
        let result = normalize(&text, cap);

        let mut current = text.clone();
        let mut sum = FixTally::zero();
        for _ in 0..result.passes {
            let (next, tally) = apply_once(&current);
            sum = sum + tally;
            current = next;
        }

        prop_assert_eq!(result.tally, sum);
        prop_assert_eq!(&result.text, &current);
        prop_assert!(result.passes <= cap);
    }

    #[test]
    fn prop_only_inserts_slashes(text in messy_text()) {
        let result = normalize(&text, DEFAULT_MAX_PASSES);
        let strip = |s: &str| s.replace(['/', ' '], "");
        prop_assert_eq!(strip(&result.text), strip(&text));
    }
}
