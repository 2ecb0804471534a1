//! Object schemas over `serde_json::Value`.
//!
//! [`ObjectSchema`] describes a JSON object field by field. Parsing checks
//! every declared field, collects all failures as nested errors, and returns
//! a new object containing only the declared fields (unknown keys are
//! stripped unless the schema is [`strict`](ObjectSchema::strict)).
//!
//! ```
//! use safeact_validator::json::ObjectSchema;
//! use safeact_validator::foundation::Schema;
//! use serde_json::json;
//!
//! let schema = ObjectSchema::new().string("from").string("alert");
//!
//! let parsed = schema
//!     .parse(json!({"from": "Bob", "alert": "Fire", "extra": 1}))
//!     .unwrap();
//! assert_eq!(parsed, json!({"from": "Bob", "alert": "Fire"}));
//!
//! let err = schema.parse(json!({"from": 7})).unwrap_err();
//! assert_eq!(err.nested.len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::foundation::{Schema, Validate, ValidationError};

type StrRule = Arc<dyn Validate<Input = str> + Send + Sync>;

/// JSON type a field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// `true` or `false`.
    Bool,
    /// Any value, including `null`.
    Any,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Any => true,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Bool => "boolean",
            FieldKind::Any => "any",
        }
    }
}

/// Name of the JSON type of `value`, as used in `type_mismatch` errors.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Clone)]
struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: bool,
    rules: Vec<StrRule>,
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Field-by-field schema for JSON objects.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
    strict: bool,
}

impl ObjectSchema {
    /// Creates an empty schema that accepts any object.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
            required,
            rules: Vec::new(),
        });
        self
    }

    /// Declares a required string field.
    #[must_use = "builder methods must be chained or built"]
    pub fn string(self, name: impl Into<String>) -> Self {
        self.push(name, FieldKind::String, true)
    }

    /// Declares a required string field checked by `rule`.
    #[must_use = "builder methods must be chained or built"]
    pub fn string_with<V>(self, name: impl Into<String>, rule: V) -> Self
    where
        V: Validate<Input = str> + Send + Sync + 'static,
    {
        let mut this = self.push(name, FieldKind::String, true);
        if let Some(field) = this.fields.last_mut() {
            field.rules.push(Arc::new(rule));
        }
        this
    }

    /// Declares a required number field.
    #[must_use = "builder methods must be chained or built"]
    pub fn number(self, name: impl Into<String>) -> Self {
        self.push(name, FieldKind::Number, true)
    }

    /// Declares a required boolean field.
    #[must_use = "builder methods must be chained or built"]
    pub fn bool(self, name: impl Into<String>) -> Self {
        self.push(name, FieldKind::Bool, true)
    }

    /// Declares an optional field of the given kind. Absent and `null`
    /// values are both accepted and left out of the parsed object.
    #[must_use = "builder methods must be chained or built"]
    pub fn optional(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.push(name, kind, false)
    }

    /// Rejects keys that are not declared instead of stripping them.
    #[must_use = "builder methods must be chained or built"]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Names of the declared fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    fn check_field(decl: &FieldSpec, value: Option<&Value>) -> Result<(), ValidationError> {
        let value = match value {
            None | Some(Value::Null) if !decl.required => return Ok(()),
            None => return Err(ValidationError::required(decl.name.clone())),
            Some(value) => value,
        };

        if !decl.kind.matches(value) {
            return Err(
                ValidationError::type_mismatch(decl.kind.as_str(), json_type_name(value))
                    .with_field(decl.name.clone()),
            );
        }

        if let Value::String(s) = value {
            for rule in &decl.rules {
                rule.validate(s)
                    .map_err(|e| e.with_field(decl.name.clone()))?;
            }
        }
        Ok(())
    }
}

impl Schema for ObjectSchema {
    type Raw = Value;
    type Output = Value;

    fn parse(&self, raw: Value) -> Result<Value, ValidationError> {
        let mut object = match raw {
            Value::Object(object) => object,
            other => {
                return Err(ValidationError::type_mismatch(
                    "object",
                    json_type_name(&other),
                ));
            }
        };

        let mut errors = Vec::new();
        for decl in &self.fields {
            if let Err(e) = Self::check_field(decl, object.get(&decl.name)) {
                errors.push(e);
            }
        }

        if self.strict {
            for key in object.keys() {
                if !self.fields.iter().any(|f| &f.name == key) {
                    errors.push(ValidationError::unrecognized_key(key.clone()));
                }
            }
        }

        if !errors.is_empty() {
            return Err(
                ValidationError::new("invalid_object", "Object validation failed")
                    .with_nested(errors),
            );
        }

        let mut parsed = Map::new();
        for decl in &self.fields {
            match object.remove(&decl.name) {
                Some(Value::Null) | None => {}
                Some(value) => {
                    parsed.insert(decl.name.clone(), value);
                }
            }
        }
        Ok(Value::Object(parsed))
    }
}
