//! # safeact-action
//!
//! Validated server actions that revalidate cached routes after they run.
//!
//! A [`SafeAction`] pairs an optional input [`Schema`](safeact_validator::foundation::Schema)
//! with an async [`Handler`]. Invoking it parses the raw input, awaits the
//! handler, and, when the handler's [`ActionResponse`] opts in, asks a
//! [`Revalidator`] to invalidate every path of the invocation in order.
//!
//! ## Core Types
//!
//! - [`Invoke`]: anything callable like an action
//! - [`SafeAction`]: schema + handler + revalidator
//! - [`Handler`]: the user function; blanket-implemented for async fns
//! - [`ActionResponse`]: payload plus optional `revalidate` flag
//! - [`RevalidationTrigger`]: how the flag is read
//! - [`RevalidationPaths`]: ordered routes of one invocation
//! - [`Revalidator`] / [`RouteCache`]: the cache-invalidation seam
//! - [`ActionError`]: validation vs handler-kind failures
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use safeact_action::prelude::*;
//! use safeact_validator::prelude::*;
//! use serde_json::{Value, json};
//!
//! async fn send(input: Value, _paths: RevalidationPaths) -> Result<ActionResponse<Value>, ActionError> {
//!     Ok(ActionResponse::revalidating(json!({"message": input["alert"]})))
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let cache = Arc::new(RouteCache::new());
//! let action = SafeAction::validated(ObjectSchema::new().string("alert"), send)
//!     .with_revalidator(cache.clone());
//!
//! let response = action
//!     .invoke(json!({"alert": "Fire"}), ["/alerts"].into())
//!     .await
//!     .unwrap();
//! assert_eq!(response.payload, json!({"message": "Fire"}));
//! assert_eq!(cache.revalidations(), vec!["/alerts"]);
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// The [`Invoke`] trait and [`SafeAction`].
pub mod action;
/// Error types separating rejected input from handler failures.
pub mod error;
/// The user-supplied handler trait.
pub mod handler;
/// Static identity of an action.
pub mod metadata;
/// Ordered revalidation path lists.
pub mod paths;
/// Convenience re-exports.
pub mod prelude;
/// Handler responses and the revalidation trigger.
pub mod response;
/// The cache-invalidation seam.
pub mod revalidate;

pub use action::{Invoke, SafeAction};
pub use error::ActionError;
pub use handler::Handler;
pub use metadata::ActionMetadata;
pub use paths::RevalidationPaths;
pub use response::{ActionResponse, RevalidationTrigger};
pub use revalidate::{FnRevalidator, NoopRevalidator, RevalidationError, Revalidator, RouteCache};
