//! Property-based tests for caret → word resolution and location checks.
//!
//! Lines are generated as `<separator><word><separator>` where separators
//! hold only whitespace and punctuation, so the word's extent is known.
#![cfg(feature = "proptest")]

use inspector::base::{LineCol, SourceRange};
use inspector::ide::{verify_location, verify_range, word_at};
use proptest::prelude::*;

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Identifier-shaped words.
fn arb_word() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,15}"
}

/// Runs without word characters.
fn arb_separator() -> impl Strategy<Value = String> {
    "[ \t(){}.,;:=+\\-*/\"]{0,8}"
}

/// A line with one word at a known position, and a column inside it.
fn arb_line_with_word() -> impl Strategy<Value = (String, String, u32, u32)> {
    (arb_separator(), arb_word(), arb_separator()).prop_flat_map(|(before, word, after)| {
        let start = before.chars().count() as u32;
        let len = word.chars().count() as u32;
        let line = format!("{before}{word}{after}");
        (Just(line), Just(word), Just(start), start..start + len)
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn word_inside_is_found((line, word, start, column) in arb_line_with_word()) {
        let found = word_at(&line, 0, column).unwrap();
        let len = word.chars().count() as u32;
        prop_assert_eq!(found.text.as_str(), word.as_str());
        prop_assert_eq!(found.range, SourceRange::new(0, start, start + len));
    }

    #[test]
    fn word_on_a_later_line_is_found(
        (line, word, _start, column) in arb_line_with_word(),
        above in arb_separator(),
    ) {
        let source = format!("{above}\n{line}\nnext");
        let found = word_at(&source, 1, column).unwrap();
        prop_assert_eq!(found.text.as_str(), word.as_str());
    }

    #[test]
    fn separators_give_no_word(line in "[ \t(){}.,;:=+\\-*/\"]{1,12}", pick in any::<prop::sample::Index>()) {
        let column = pick.index(line.chars().count()) as u32;
        let found = word_at(&line, 0, column).unwrap();
        prop_assert!(found.is_empty());
    }

    #[test]
    fn columns_past_the_line_are_rejected(line in "[a-z ]{0,10}", extra in 1u32..5) {
        let column = line.chars().count() as u32 + extra;
        prop_assert!(word_at(&line, 0, column).is_err());
    }

    #[test]
    fn found_word_verifies_at_its_range((line, word, start, column) in arb_line_with_word()) {
        let found = word_at(&line, 0, column).unwrap();
        prop_assert!(verify_location(&line, LineCol::new(0, start), &word));
        prop_assert!(verify_range(&line, found.range, &word));
    }

    #[test]
    fn neighbouring_text_fails_verification((line, word, start, _column) in arb_line_with_word()) {
        let len = word.chars().count() as u32;
        let range = SourceRange::new(0, start, start + len);
        let longer = format!("{word}_");
        let shifted = format!(" {line}");
        prop_assert!(!verify_range(&line, range, &longer));
        prop_assert!(!verify_location(&line, LineCol::new(0, start + len), &word));
        prop_assert!(!verify_range(&shifted, range, &word));
    }
}
