//! Rules, schemas and the error they share.
//!
//! - **Traits**: [`Validate`], [`ValidateExt`], [`Schema`]
//! - **Errors**: [`ValidationError`]
//! - **Schemas**: [`Passthrough`], [`Checked`], [`Typed`]
//!
//! Rules ([`Validate`]) compose with combinators and only inspect values.
//! Schemas ([`Schema`]) own the raw input and produce the validated value;
//! they are what an action holds as its input validation.

pub mod error;
pub mod schema;
pub mod traits;

pub use error::ValidationError;
pub use schema::{Checked, Passthrough, Schema, Typed};
pub use traits::{Validate, ValidateExt};
