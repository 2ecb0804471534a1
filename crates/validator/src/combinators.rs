//! Ways to build one rule out of others.

use crate::foundation::{Validate, ValidationError};

/// Passes when both rules pass; reports the first failure.
///
/// `right` is not consulted once `left` has failed.
///
/// ```
/// use safeact_validator::prelude::*;
///
/// let name = and(min_length(2), max_length(5));
/// assert!(name.validate("Bob").is_ok());
/// assert_eq!(name.validate("B").unwrap_err().code, "min_length");
/// assert_eq!(name.validate("Bartholomew").unwrap_err().code, "max_length");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R>(pub L, pub R);

impl<L, R> Validate for And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn validate(&self, input: &L::Input) -> Result<(), ValidationError> {
        self.0.validate(input).and_then(|()| self.1.validate(input))
    }
}

/// Passes exactly when the wrapped rule fails.
///
/// The error carries code `not` and the wrapped rule's name under `rule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Not<V>(pub V);

impl<V: Validate> Validate for Not<V> {
    type Input = V::Input;

    fn validate(&self, input: &V::Input) -> Result<(), ValidationError> {
        if self.0.validate(input).is_err() {
            return Ok(());
        }
        Err(
            ValidationError::new("not", "Value must not satisfy the inner rule")
                .with_param("rule", self.0.name().to_owned()),
        )
    }
}

/// Shorthand for [`And`].
pub const fn and<L, R>(left: L, right: R) -> And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    And(left, right)
}

/// Shorthand for [`Not`].
pub const fn not<V: Validate>(rule: V) -> Not<V> {
    Not(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{max_length, min_length, not_empty};
    use rstest::rstest;

    #[rstest]
    #[case::both_pass("ab", None)]
    #[case::left_fails_first("", Some("min_length"))]
    #[case::right_fails("abcd", Some("max_length"))]
    fn and_reports_first_failure(#[case] input: &str, #[case] code: Option<&str>) {
        let rule = and(min_length(1), max_length(3));
        let got = rule.validate(input).err().map(|e| e.code.into_owned());
        assert_eq!(got.as_deref(), code);
    }

    #[test]
    fn not_names_the_wrapped_rule() {
        let err = not(not_empty()).validate("x").unwrap_err();
        assert_eq!(err.code, "not");
        assert!(err.param("rule").unwrap().contains("NotEmpty"));
        assert!(not(not_empty()).validate("").is_ok());
    }
}
