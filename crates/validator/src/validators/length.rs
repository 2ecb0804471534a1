//! Rules about how long a string is.
//!
//! Length is measured in Unicode scalar values (chars), so `"żółw"` has a
//! length of 4.

use crate::foundation::{Validate, ValidationError};

crate::validator! {
    /// Rejects the empty string.
    pub NotEmpty(input: str) = !input.is_empty();
    fails with "not_empty", "String must not be empty";
    fn not_empty;
}

crate::validator! {
    /// Rejects strings that are empty or all whitespace.
    pub NotBlank(input: str) = !input.trim().is_empty();
    fails with "not_blank", "String must not be blank";
    fn not_blank;
}

fn char_len(input: &str) -> usize {
    input.chars().count()
}

/// Inclusive lower bound on length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinLength {
    /// Fewest characters allowed.
    pub min: usize,
}

impl Validate for MinLength {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        match char_len(input) {
            len if len < self.min => Err(ValidationError::min_length(self.min, len)),
            _ => Ok(()),
        }
    }
}

/// Inclusive upper bound on length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaxLength {
    /// Most characters allowed.
    pub max: usize,
}

impl Validate for MaxLength {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        match char_len(input) {
            len if len > self.max => Err(ValidationError::max_length(self.max, len)),
            _ => Ok(()),
        }
    }
}

/// At least `min` characters.
#[must_use]
pub const fn min_length(min: usize) -> MinLength {
    MinLength { min }
}

/// At most `max` characters.
#[must_use]
pub const fn max_length(max: usize) -> MaxLength {
    MaxLength { max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case(" ", true)]
    #[case("Fire", true)]
    fn not_empty_cases(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(not_empty().validate(input).is_ok(), ok);
    }

    #[rstest]
    #[case("", false)]
    #[case(" \t", false)]
    #[case(" x ", true)]
    fn not_blank_cases(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(not_blank().validate(input).is_ok(), ok);
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(max_length(4).validate("żółw").is_ok());
        assert!(min_length(4).validate("żółw").is_ok());
    }

    #[test]
    fn min_length_reports_params() {
        let err = min_length(3).validate("ab").unwrap_err();
        assert_eq!(err.param("min"), Some("3"));
        assert_eq!(err.param("actual"), Some("2"));
    }

    proptest! {
        #[test]
        fn min_and_max_agree_with_char_count(s in ".{0,32}", bound in 0usize..32) {
            let len = s.chars().count();
            prop_assert_eq!(min_length(bound).validate(&s).is_ok(), len >= bound);
            prop_assert_eq!(max_length(bound).validate(&s).is_ok(), len <= bound);
        }
    }
}
