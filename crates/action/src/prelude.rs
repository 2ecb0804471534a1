//! Convenience re-exports for action authors.
//!
//! ```
//! use safeact_action::prelude::*;
//!
//! let paths = RevalidationPaths::from(["/"]);
//! assert!(RevalidationTrigger::default().should_revalidate(Some(true)));
//! assert_eq!(paths.len(), 1);
//! ```

pub use crate::action::{Invoke, SafeAction};
pub use crate::error::ActionError;
pub use crate::handler::Handler;
pub use crate::metadata::ActionMetadata;
pub use crate::paths::RevalidationPaths;
pub use crate::response::{ActionResponse, RevalidationTrigger};
pub use crate::revalidate::{NoopRevalidator, RevalidationError, Revalidator, RouteCache};
