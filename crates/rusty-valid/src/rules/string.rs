// File: src/rules/string.rs
// Purpose: Text rules (`rx`, `digit`)

use std::borrow::Cow;

use regex::Regex;

use crate::value::{Field, Scalar};

/// `rx~pattern`: the value must be text matching every given pattern
///
/// Each `rx` occurrence in an annotation is a separate rule, so repeated patterns are AND-ed.
pub fn matches_patterns(field: &Field<'_>, args: &[&str]) -> bool {
    if args.is_empty() {
        return true;
    }
    if field.is_absent() {
        return false;
    }
    let Scalar::Str(text) = field.scalar() else {
        return false;
    };

    args.iter().all(|pattern| matches_regex(text, pattern))
}

/// Check if string matches regex pattern; an invalid pattern never matches
pub fn matches_regex(value: &str, pattern: &str) -> bool {
    match Regex::new(pattern) {
        Ok(regex) => regex.is_match(value),
        Err(err) => {
            tracing::warn!(pattern, error = %err, "Invalid rx pattern");
            false
        }
    }
}

/// `digit` / `digit~5,10`
///
/// Integers are stringified in base 10; other non-text shapes read as empty text.
/// Without an argument every character must be an ASCII digit. With a list of
/// lengths only the character length is checked against the list, not the
/// composition (`"1234v"` passes `digit~5`). Absent and plain zero values pass.
pub fn is_digits(field: &Field<'_>, args: &[&str]) -> bool {
    if field.is_vacant() {
        return true;
    }

    let text: Cow<'_, str> = match field.scalar() {
        Scalar::Str(text) => Cow::Borrowed(text),
        Scalar::Int(value) => Cow::Owned(value.to_string()),
        Scalar::Uint(value) => Cow::Owned(value.to_string()),
        _ => Cow::Borrowed(""),
    };
    let length = text.chars().count() as i64;

    match args.first() {
        // An unparsable length counts as 0
        Some(lengths) => lengths
            .split(',')
            .any(|allowed| allowed.parse::<i64>().unwrap_or(0) == length),
        None => text.chars().all(|c| c.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rx(value: &dyn crate::FieldValue, patterns: &[&str]) -> bool {
        matches_patterns(&Field::resolve(value), patterns)
    }

    fn digit(value: &dyn crate::FieldValue, args: &[&str]) -> bool {
        is_digits(&Field::resolve(value), args)
    }

    #[test]
    fn test_rx_matches_every_pattern() {
        let value = "12345".to_string();
        assert!(rx(&value, &[r"^\d+$", "[0-8]+"]));
        assert!(!rx(&value, &[r"^\d+$", "^9"]));
        assert!(rx(&value, &[]));
    }

    #[test]
    fn test_rx_rejects_non_text_and_absent() {
        assert!(!rx(&12345i32, &[r"^\d+$"]));
        assert!(!rx(&None::<String>, &[r"^\d+$"]));
        assert!(rx(&Some("abc".to_string()), &["^[a-z]+$"]));
    }

    #[test]
    fn test_rx_invalid_pattern_fails() {
        assert!(!rx(&"abc".to_string(), &["(unclosed"]));
    }

    #[test]
    fn test_digit_without_argument() {
        assert!(digit(&"1234567890".to_string(), &[]));
        assert!(!digit(&"1234567890a".to_string(), &[]));
        assert!(digit(&9100001111i64, &[]));
        assert!(!digit(&-15i64, &[]));
        assert!(digit(&String::new(), &[]));
    }

    #[test]
    fn test_digit_with_lengths() {
        assert!(digit(&"1234567890".to_string(), &["5,10"]));
        assert!(digit(&"12345".to_string(), &["5,10"]));
        assert!(!digit(&"123456789".to_string(), &["5,10"]));
        // Length membership only, composition is not checked
        assert!(digit(&"1234v".to_string(), &["5,10"]));
        assert!(!digit(&9100001111i64, &["9"]));
        assert!(digit(&1223u32, &["4"]));
        assert!(!digit(&1123u32, &["3"]));
    }

    #[test]
    fn test_digit_optional_values() {
        assert!(digit(&None::<String>, &[]));
        assert!(digit(&Some(0u32), &[]));
        assert!(!digit(&Some("12a".to_string()), &[]));
    }
}
