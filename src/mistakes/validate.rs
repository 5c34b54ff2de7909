//! Input validation for record fields.
//!
//! Every field the user types goes through [`validate_field`] before any
//! operation accepts it. The value is trimmed first; the trimmed value must
//! be non-empty, no longer than the configured bound (counted in characters)
//! and free of ASCII control characters.

use thiserror::Error;

/// Default upper bound on a single field, in characters.
pub const DEFAULT_MAX_INPUT_LEN: usize = 300;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("input cannot be empty")]
    Empty,

    #[error("input too long (max {max} characters)")]
    TooLong { max: usize },

    #[error("input contains control characters")]
    ControlCharacter,
}

fn is_control(c: char) -> bool {
    (c as u32) < 32 || (c as u32) == 127
}

/// Trims `raw` and checks it against the field rules, returning the trimmed value.
pub fn validate_field(raw: &str, max_len: usize) -> Result<String, ValidationError> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(ValidationError::Empty);
    }

    if value.chars().count() > max_len {
        return Err(ValidationError::TooLong { max: max_len });
    }

    if value.chars().any(is_control) {
        return Err(ValidationError::ControlCharacter);
    }

    Ok(value.to_string())
}

/// Lower-cases and trims a subject so that "Math " and "math" group together.
pub fn normalize_subject(subject: &str) -> String {
    subject.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_plain_text() {
        assert_eq!(validate_field("  wrong sign  ", 300).unwrap(), "wrong sign");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(validate_field("", 300), Err(ValidationError::Empty));
        assert_eq!(validate_field("   ", 300), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_input_over_the_bound() {
        let long = "a".repeat(301);
        assert_eq!(
            validate_field(&long, 300),
            Err(ValidationError::TooLong { max: 300 })
        );
        assert!(validate_field(&"a".repeat(300), 300).is_ok());
    }

    #[test]
    fn length_is_counted_in_characters() {
        let accented = "é".repeat(10);
        assert!(validate_field(&accented, 10).is_ok());
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(
            validate_field("bad\u{7}bell", 300),
            Err(ValidationError::ControlCharacter)
        );
        assert_eq!(
            validate_field("del\u{7f}", 300),
            Err(ValidationError::ControlCharacter)
        );
        assert_eq!(
            validate_field("tab\there", 300),
            Err(ValidationError::ControlCharacter)
        );
    }

    #[test]
    fn normalizes_subject_case() {
        assert_eq!(normalize_subject("  Math "), "math");
    }
}
