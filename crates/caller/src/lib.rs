//! # safeact-caller
//!
//! UI-side adapter for safe actions.
//!
//! A [`StatefulCaller`] wraps any [`Invoke`](safeact_action::Invoke) callable
//! and exposes three observable fields, `data`, `is_running` and `error`,
//! plus a [`trigger`](StatefulCaller::trigger) operation. It builds the
//! revalidation path list for each run from [`CallerOptions`] and, when asked,
//! the current route from an explicit [`RouteAccessor`].
//!
//! State changes are published on a `tokio::sync::watch` channel; UI code
//! binds to [`StatefulCaller::subscribe`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod caller;
mod options;
pub mod route;
mod state;

pub use caller::{StatefulCaller, TriggerOutcome};
pub use options::{CallerOptions, FailureDataPolicy};
pub use route::{RouteAccessor, SharedRoute, StaticRoute};
pub use state::{CallPhase, CallState};
