//! The parsing capability actions validate their input with.
//!
//! A [`Validate`] rule only inspects a value. A [`Schema`] takes ownership of
//! raw input and either produces the validated value (possibly of another
//! type, e.g. JSON into a typed struct) or rejects it with a
//! [`ValidationError`].

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::foundation::{Validate, ValidationError};

/// Parses raw input into a validated value.
///
/// # Examples
///
/// ```
/// use safeact_validator::foundation::{Schema, ValidationError};
///
/// struct Trimmed;
///
/// impl Schema for Trimmed {
///     type Raw = String;
///     type Output = String;
///
///     fn parse(&self, raw: String) -> Result<String, ValidationError> {
///         let trimmed = raw.trim();
///         if trimmed.is_empty() {
///             return Err(ValidationError::new("blank", "Input is blank"));
///         }
///         Ok(trimmed.to_owned())
///     }
/// }
///
/// assert_eq!(Trimmed.parse("  hi ".into()).unwrap(), "hi");
/// assert!(Trimmed.parse("   ".into()).is_err());
/// ```
pub trait Schema: Send + Sync {
    /// The unvalidated input accepted by [`parse`](Schema::parse).
    type Raw;
    /// The value produced when the input conforms.
    type Output;

    /// Parses `raw`, failing with a [`ValidationError`] on mismatch.
    fn parse(&self, raw: Self::Raw) -> Result<Self::Output, ValidationError>;
}

impl<S: Schema + ?Sized> Schema for Arc<S> {
    type Raw = S::Raw;
    type Output = S::Output;

    fn parse(&self, raw: Self::Raw) -> Result<Self::Output, ValidationError> {
        (**self).parse(raw)
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    type Raw = S::Raw;
    type Output = S::Output;

    fn parse(&self, raw: Self::Raw) -> Result<Self::Output, ValidationError> {
        (**self).parse(raw)
    }
}

// ============================================================================
// PASSTHROUGH
// ============================================================================

/// Schema that accepts every input unchanged.
///
/// Used by actions that were built without input validation.
pub struct Passthrough<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> Passthrough<T> {
    /// Creates a pass-through schema.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Passthrough<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Passthrough<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Passthrough<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passthrough")
    }
}

impl<T> Schema for Passthrough<T> {
    type Raw = T;
    type Output = T;

    fn parse(&self, raw: T) -> Result<T, ValidationError> {
        Ok(raw)
    }
}

// ============================================================================
// CHECKED
// ============================================================================

/// Schema that runs a [`Validate`] rule against an owned value and returns
/// the value untouched when the rule passes.
///
/// ```
/// use safeact_validator::prelude::*;
///
/// let schema: Checked<_, String> = min_length(3).into_schema();
/// assert_eq!(schema.parse("Bob".to_string()).unwrap(), "Bob");
/// assert!(schema.parse("Al".to_string()).is_err());
/// ```
pub struct Checked<V, T> {
    rule: V,
    _marker: PhantomData<fn(T) -> T>,
}

impl<V, T> Checked<V, T> {
    /// Wraps a rule.
    pub fn new(rule: V) -> Self {
        Self {
            rule,
            _marker: PhantomData,
        }
    }

    /// Returns the wrapped rule.
    pub fn rule(&self) -> &V {
        &self.rule
    }
}

impl<V: Clone, T> Clone for Checked<V, T> {
    fn clone(&self) -> Self {
        Self::new(self.rule.clone())
    }
}

impl<V: fmt::Debug, T> fmt::Debug for Checked<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checked").field("rule", &self.rule).finish()
    }
}

impl<V, T> Schema for Checked<V, T>
where
    V: Validate + Send + Sync,
    T: Borrow<V::Input>,
{
    type Raw = T;
    type Output = T;

    fn parse(&self, raw: T) -> Result<T, ValidationError> {
        self.rule.validate(raw.borrow())?;
        Ok(raw)
    }
}

// ============================================================================
// TYPED
// ============================================================================

type Rule<T> = Arc<dyn Validate<Input = T> + Send + Sync>;

/// Schema that deserializes a JSON value into `T`, then optionally runs a
/// rule over the typed value.
///
/// Deserialization failures are reported with code `"invalid_input"`.
///
/// ```
/// use safeact_validator::foundation::{Schema, Typed};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct Alert { from: String, alert: String }
///
/// let schema = Typed::<Alert>::new();
/// let alert = schema.parse(json!({"from": "Bob", "alert": "Fire"})).unwrap();
/// assert_eq!(alert.from, "Bob");
///
/// let err = schema.parse(json!({"from": 1})).unwrap_err();
/// assert_eq!(err.code.as_ref(), "invalid_input");
/// ```
pub struct Typed<T> {
    rule: Option<Rule<T>>,
}

impl<T> Typed<T> {
    /// Creates a schema that only checks the shape of the input.
    pub fn new() -> Self {
        Self { rule: None }
    }

    /// Adds a rule that runs on the deserialized value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule<V>(mut self, rule: V) -> Self
    where
        V: Validate<Input = T> + Send + Sync + 'static,
    {
        self.rule = Some(Arc::new(rule));
        self
    }
}

impl<T> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Self {
            rule: self.rule.clone(),
        }
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("target", &std::any::type_name::<T>())
            .field("has_rule", &self.rule.is_some())
            .finish()
    }
}

impl<T> Schema for Typed<T>
where
    T: DeserializeOwned,
{
    type Raw = serde_json::Value;
    type Output = T;

    fn parse(&self, raw: serde_json::Value) -> Result<T, ValidationError> {
        let value: T = serde_json::from_value(raw).map_err(|e| {
            ValidationError::new("invalid_input", e.to_string())
                .with_param("target", std::any::type_name::<T>())
        })?;
        if let Some(rule) = &self.rule {
            rule.validate(&value)?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidateExt;
    use crate::validators::{max_length, not_empty};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Alert {
        from: String,
        alert: String,
    }

    struct AlertNotEmpty;

    impl Validate for AlertNotEmpty {
        type Input = Alert;

        fn validate(&self, input: &Alert) -> Result<(), ValidationError> {
            not_empty()
                .validate(&input.alert)
                .map_err(|e| e.with_field("alert"))
        }
    }

    #[test]
    fn passthrough_returns_input() {
        let schema = Passthrough::<i64>::new();
        assert_eq!(schema.parse(42).unwrap(), 42);
    }

    #[test]
    fn checked_rejects_with_rule_error() {
        let schema: Checked<_, String> = not_empty().and(max_length(4)).into_schema();
        assert_eq!(schema.parse("Fire".to_string()).unwrap(), "Fire");
        let err = schema.parse("Flood".to_string()).unwrap_err();
        assert_eq!(err.code.as_ref(), "max_length");
    }

    #[test]
    fn typed_deserializes() {
        let schema = Typed::<Alert>::new();
        let alert = schema
            .parse(json!({"from": "Bob", "alert": "Fire"}))
            .unwrap();
        assert_eq!(
            alert,
            Alert {
                from: "Bob".into(),
                alert: "Fire".into()
            }
        );
    }

    #[test]
    fn typed_reports_shape_mismatch() {
        let schema = Typed::<Alert>::new();
        let err = schema.parse(json!({"from": "Bob"})).unwrap_err();
        assert_eq!(err.code.as_ref(), "invalid_input");
        assert!(err.message.contains("alert"));
    }

    #[test]
    fn typed_runs_rule_after_deserializing() {
        let schema = Typed::<Alert>::new().with_rule(AlertNotEmpty);
        let err = schema
            .parse(json!({"from": "Bob", "alert": ""}))
            .unwrap_err();
        assert_eq!(err.code.as_ref(), "not_empty");
        assert_eq!(err.field.as_deref(), Some("alert"));
    }

    #[test]
    fn schemas_are_usable_as_trait_objects() {
        let schema: Box<dyn Schema<Raw = String, Output = String>> =
            Box::new(Passthrough::new());
        assert_eq!(schema.parse("x".into()).unwrap(), "x");
    }
}
