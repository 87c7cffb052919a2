//! Property-based tests for the text analysis pipeline
//!
//! Uses proptest to generate random inputs and verify structural
//! properties of the stemmer, analyzer, and edit-distance bound.

use proptest::prelude::*;

use scriptorium::search::analyzer::{analyze, fold_ascii};
use scriptorium::search::index::{max_edits, within_edit_distance};
use scriptorium::search::stemmer::stem;

proptest! {
    #[test]
    fn test_stem_never_panics_and_never_grows(word in "[a-z]{1,30}") {
        let stemmed = stem(&word);
        prop_assert!(!stemmed.is_empty());
        prop_assert!(stemmed.len() <= word.len());
    }

    #[test]
    fn test_stem_is_idempotent_on_short_words(word in "[a-z]{1,2}") {
        // Words of one or two characters pass through unchanged.
        prop_assert_eq!(stem(&word), word);
    }

    #[test]
    fn test_analyze_tokens_are_folded(text in ".{0,200}") {
        for token in analyze(&text) {
            prop_assert!(!token.surface.is_empty());
            prop_assert!(!token.stemmed.is_empty());
            prop_assert!(token
                .surface
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_fold_ascii_output_is_ascii(text in ".{0,100}") {
        let folded = fold_ascii(&text);
        prop_assert!(folded
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_edit_distance_is_symmetric(
        a in "[a-z]{0,12}",
        b in "[a-z]{0,12}",
    ) {
        prop_assert_eq!(
            within_edit_distance(&a, &b, 12),
            within_edit_distance(&b, &a, 12)
        );
    }

    #[test]
    fn test_edit_distance_zero_iff_equal(
        a in "[a-z]{0,12}",
        b in "[a-z]{0,12}",
    ) {
        let within = within_edit_distance(&a, &b, 12);
        if a == b {
            prop_assert_eq!(within, Some(0));
        } else {
            prop_assert_ne!(within, Some(0));
        }
    }

    #[test]
    fn test_edit_distance_respects_the_bound(
        a in "[a-z]{0,12}",
        b in "[a-z]{0,12}",
        max in 0u32..4,
    ) {
        if let Some(distance) = within_edit_distance(&a, &b, max) {
            prop_assert!(distance <= max);
        }
    }

    #[test]
    fn test_max_edits_is_monotonic(len in 0usize..64) {
        prop_assert!(max_edits(len) <= max_edits(len + 1));
        prop_assert!(max_edits(len) <= 2);
    }
}
