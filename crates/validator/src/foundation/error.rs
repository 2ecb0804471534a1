//! The rejection type shared by every validator and schema.
//!
//! Object schemas collect one child error per failing key under a parent
//! error, so a caller can show every problem with a form at once.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

type Text = Cow<'static, str>;

/// Why an input was rejected.
///
/// ```
/// use safeact_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("invalid_object", "Object validation failed")
///     .with_nested_error(ValidationError::required("from"));
///
/// assert_eq!(error.total_error_count(), 2);
/// assert_eq!(error.nested[0].field.as_deref(), Some("from"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Stable identifier such as `required` or `min_length`.
    pub code: Text,

    /// Text meant for people.
    pub message: Text,

    /// Key of the offending field, when the error belongs to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Text>,

    /// Extra details in the order they were attached.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<(Text, Text)>,

    /// Per-field failures of an object.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// An error with no field, params or children.
    pub fn new(code: impl Into<Text>, message: impl Into<Text>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Attributes the error to `field`.
    #[must_use]
    pub fn with_field(self, field: impl Into<Text>) -> Self {
        Self {
            field: Some(field.into()),
            ..self
        }
    }

    /// Attaches a `key=value` detail.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<Text>, value: impl Into<Text>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the children.
    #[must_use]
    pub fn with_nested(self, nested: Vec<ValidationError>) -> Self {
        Self { nested, ..self }
    }

    /// Appends one child.
    #[must_use]
    pub fn with_nested_error(mut self, child: ValidationError) -> Self {
        self.nested.push(child);
        self
    }

    /// Value of the detail named `key`.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v.as_ref()))
    }

    /// This error plus all of its descendants.
    #[must_use]
    pub fn total_error_count(&self) -> usize {
        self.iter().count()
    }

    /// Walks this error and its descendants, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.nested.iter().rev());
            Some(next)
        })
    }

    /// A missing required key.
    pub fn required(field: impl Into<Text>) -> Self {
        Self::new("required", "This field is required").with_field(field)
    }

    pub(crate) fn min_length(min: usize, actual: usize) -> Self {
        Self::new("min_length", format!("Must be at least {min} characters"))
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    pub(crate) fn max_length(max: usize, actual: usize) -> Self {
        Self::new("max_length", format!("Must be at most {max} characters"))
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    pub(crate) fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::new(
            "type_mismatch",
            format!("Expected {expected}, received {actual}"),
        )
        .with_param("expected", expected)
        .with_param("actual", actual)
    }

    pub(crate) fn unrecognized_key(key: impl Into<Text>) -> Self {
        Self::new("unrecognized_key", "Unrecognized key in object").with_field(key)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[{field}] {}: {}", self.code, self.message)?,
            None => write!(f, "{}: {}", self.code, self.message)?,
        }

        let mut sep = " (";
        for (k, v) in &self.params {
            write!(f, "{sep}{k}={v}")?;
            sep = ", ";
        }
        if !self.params.is_empty() {
            f.write_str(")")?;
        }

        self.nested
            .iter()
            .try_for_each(|child| write!(f, "; {child}"))
    }
}

impl std::error::Error for ValidationError {}
