//! Property-based tests for color normalization
//!
//! Whatever a client submits, an accepted color is always in canonical form
//! and malformed input never slips through.

use bonekit_bones::{ColorMode, ColorValueNormalizer, ReadOutcome};
use proptest::prelude::*;

fn mode() -> impl Strategy<Value = ColorMode> {
    prop_oneof![Just(ColorMode::Rgb), Just(ColorMode::Rgba)]
}

/// Hex input with at least one character outside the color alphabet
fn with_foreign_char() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"#?[0-9a-fA-F]{0,4}[g-zG-Z!@%. _\-]{1,2}[0-9a-fA-F]{0,4}")
        .expect("Valid regex for foreign characters")
}

/// Hex input with two or more hashes
fn with_extra_hashes() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[0-9a-f]{0,4}#[0-9a-f#]{0,4}#[0-9a-f]{0,4}")
        .expect("Valid regex for repeated hashes")
}

/// Anything built from the color alphabet, either case
fn alphabet_input() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"#?[0-9a-fA-F]{0,10}").expect("Valid regex for hex input")
}

fn is_canonical(value: &str, mode: ColorMode) -> bool {
    value.len() == mode.digits() + 1
        && value.starts_with('#')
        && value[1..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

proptest! {
    #[test]
    fn foreign_characters_are_invalid(mode in mode(), raw in with_foreign_char()) {
        let normalizer = ColorValueNormalizer::new(mode);
        prop_assert!(matches!(
            normalizer.validate_and_normalize(Some(&raw)),
            ReadOutcome::Invalid(_)
        ));
    }

    #[test]
    fn repeated_hashes_are_invalid(mode in mode(), raw in with_extra_hashes()) {
        let normalizer = ColorValueNormalizer::new(mode);
        prop_assert!(matches!(
            normalizer.validate_and_normalize(Some(&raw)),
            ReadOutcome::Invalid(_)
        ));
    }

    #[test]
    fn accepted_values_are_canonical_and_stable(mode in mode(), raw in alphabet_input()) {
        let normalizer = ColorValueNormalizer::new(mode);
        if let ReadOutcome::Valid(value) = normalizer.validate_and_normalize(Some(&raw)) {
            prop_assert!(is_canonical(&value, mode), "{raw} normalized to {value}");
            prop_assert_eq!(
                normalizer.validate_and_normalize(Some(&value)),
                ReadOutcome::Valid(value.clone())
            );
        }
    }

    #[test]
    fn case_does_not_matter(mode in mode(), raw in alphabet_input()) {
        let normalizer = ColorValueNormalizer::new(mode);
        prop_assert_eq!(
            normalizer.validate_and_normalize(Some(&raw.to_uppercase())),
            normalizer.validate_and_normalize(Some(&raw.to_lowercase()))
        );
    }

    #[test]
    fn full_length_digits_always_accepted(
        mode in mode(),
        hash in any::<bool>(),
        digits in "[0-9a-fA-F]{8}",
    ) {
        let digits = &digits[..mode.digits()];
        let raw = if hash { format!("#{digits}") } else { digits.to_string() };
        prop_assert_eq!(
            ColorValueNormalizer::new(mode).validate_and_normalize(Some(&raw)),
            ReadOutcome::Valid(format!("#{}", digits.to_lowercase()))
        );
    }
}
