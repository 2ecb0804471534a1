//! # safeact-validator
//!
//! Input validation for safeact actions.
//!
//! ## Quick Start
//!
//! ```
//! use safeact_validator::prelude::*;
//! use serde_json::json;
//!
//! // Rules compose with .and() / .not()
//! let alert = not_blank().and(max_length(140));
//! assert!(alert.validate("Fire").is_ok());
//!
//! // Schemas own raw input and produce the validated value
//! let schema = ObjectSchema::new().string("from").string_with("alert", alert);
//! assert!(schema.parse(json!({"from": "Bob", "alert": "Fire"})).is_ok());
//! assert!(schema.parse(json!({"from": "Bob", "alert": "  "})).is_err());
//! ```
//!
//! ## Building blocks
//!
//! - [`Validate`](foundation::Validate): inspects a borrowed value
//! - [`Schema`](foundation::Schema): parses raw input into a validated value;
//!   this is what an action's input validation is
//! - [`ObjectSchema`](json::ObjectSchema): declarative JSON object schema
//! - [`Typed`](foundation::Typed): JSON into a `serde` type, plus an optional rule

// Rules return ValidationError unboxed.
#![allow(clippy::result_large_err)]

pub mod combinators;
pub mod foundation;
pub mod json;
mod macros;
pub mod prelude;
pub mod validators;
