//! Prelude module for convenient imports.
//!
//! ```
//! use safeact_validator::prelude::*;
//!
//! let from = not_empty().and(max_length(32));
//! assert!(from.validate("Bob").is_ok());
//! ```

pub use crate::foundation::{
    Checked, Passthrough, Schema, Typed, Validate, ValidateExt, ValidationError,
};

pub use crate::validators::{
    MaxLength, MinLength, NotBlank, NotEmpty, max_length, min_length, not_blank, not_empty,
};

pub use crate::combinators::{And, Not, and, not};

pub use crate::json::{FieldKind, ObjectSchema};
