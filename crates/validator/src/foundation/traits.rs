//! Rules and their combinators.
//!
//! [`Validate`] checks a borrowed value without transforming it;
//! [`ValidateExt`] adds the fluent combinator API on top.

use crate::combinators::{And, Not};
use crate::foundation::ValidationError;
use crate::foundation::schema::Checked;

/// A check on a borrowed value.
///
/// `Input` names what the rule looks at, so a string rule cannot be handed
/// a number. It may be unsized (`str`, `[T]`).
///
/// ```
/// use safeact_validator::foundation::{Validate, ValidationError};
///
/// struct NoShouting;
///
/// impl Validate for NoShouting {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.chars().any(char::is_lowercase) || input.is_empty() {
///             Ok(())
///         } else {
///             Err(ValidationError::new("no_shouting", "Please do not shout"))
///         }
///     }
/// }
///
/// assert!(NoShouting.validate("Fire in the hall").is_ok());
/// assert!(NoShouting.validate("FIRE").is_err());
/// ```
pub trait Validate {
    /// What the rule inspects.
    type Input: ?Sized;

    /// `Ok(())` when `input` satisfies the rule.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Shown in errors that mention another rule, such as `not`.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<V> Validate for Box<V>
where
    V: Validate + ?Sized,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V> Validate for std::sync::Arc<V>
where
    V: Validate + ?Sized,
{
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

/// Method-call spelling of the combinators, for every sized rule.
///
/// ```
/// use safeact_validator::prelude::*;
///
/// let alert = not_empty().and(max_length(140));
/// assert!(alert.validate("Fire").is_ok());
/// assert!(alert.validate("").is_err());
/// ```
pub trait ValidateExt: Validate + Sized {
    /// See [`And`].
    fn and<V>(self, other: V) -> And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        And(self, other)
    }

    /// See [`Not`].
    fn not(self) -> Not<Self> {
        Not(self)
    }

    /// Turns the rule into a [`Schema`](crate::foundation::Schema) that
    /// checks an owned `T` and hands it back unchanged on success.
    fn into_schema<T>(self) -> Checked<Self, T>
    where
        T: std::borrow::Borrow<Self::Input>,
    {
        Checked::new(self)
    }
}

impl<V: Validate> ValidateExt for V {}
