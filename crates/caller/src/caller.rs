//! The stateful caller.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use safeact_action::{ActionError, Invoke, RevalidationPaths};
use tokio::sync::watch;

use crate::options::CallerOptions;
use crate::route::RouteAccessor;
use crate::state::{CallPhase, CallState};

/// How a single [`StatefulCaller::trigger`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome<O> {
    /// The run succeeded and its payload is now `data`.
    Completed(O),
    /// The run failed and its error is now `error`.
    Failed(ActionError),
    /// A newer trigger or a reset happened while this run was in flight; its
    /// result was discarded without touching state.
    Superseded,
}

impl<O> TriggerOutcome<O> {
    /// Returns `true` if the run succeeded and was applied.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Returns `true` if the run failed and was applied.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns `true` if the result was discarded.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }

    /// The payload of a completed run.
    pub fn data(&self) -> Option<&O> {
        match self {
            Self::Completed(data) => Some(data),
            _ => None,
        }
    }
}

struct Shared<A: Invoke> {
    action: A,
    /// Bumped by every trigger and reset, only while the state lock is held.
    generation: AtomicU64,
    state: watch::Sender<CallState<A::Output>>,
}

/// Wraps an action with observable `data` / `is_running` / `error` state.
///
/// Triggering runs the action with the configured revalidation paths (plus
/// the current route when `revalidate_current_page` is set) and records the
/// outcome. Errors never escape `trigger`; they land in `error`.
///
/// Each trigger takes a new generation. A run that completes after a newer
/// trigger (or a [`reset`](Self::reset)) is discarded, so state always
/// reflects the most recent run and `is_running` stays `true` until that run
/// finishes.
///
/// Cloning is cheap; clones share the action and the state.
///
/// ```
/// use safeact_action::prelude::*;
/// use safeact_caller::{CallPhase, CallerOptions, StatefulCaller, StaticRoute};
///
/// async fn greet(name: String, _paths: RevalidationPaths) -> Result<ActionResponse<String>, ActionError> {
///     Ok(ActionResponse::revalidating(format!("hello {name}")))
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let caller = StatefulCaller::with_options(
///     SafeAction::new(greet),
///     CallerOptions::new().with_revalidate_current_page(true),
/// )
/// .with_route(StaticRoute::new("/greetings"));
///
/// assert_eq!(caller.effective_paths(), RevalidationPaths::from(["/greetings"]));
///
/// caller.trigger("Bob".into()).await;
/// assert_eq!(caller.data().as_deref(), Some("hello Bob"));
/// assert_eq!(caller.phase(), CallPhase::Succeeded);
/// # }
/// ```
pub struct StatefulCaller<A: Invoke> {
    shared: Arc<Shared<A>>,
    options: Arc<CallerOptions>,
    route: Option<Arc<dyn RouteAccessor>>,
}

impl<A> StatefulCaller<A>
where
    A: Invoke,
    A::Output: Clone + Sync,
{
    /// Wraps `action` with every option at its default.
    pub fn new(action: A) -> Self {
        Self::with_options(action, CallerOptions::default())
    }

    /// Wraps `action` with explicit options.
    pub fn with_options(action: A, options: CallerOptions) -> Self {
        let (state, _) = watch::channel(CallState::idle());
        Self {
            shared: Arc::new(Shared {
                action,
                generation: AtomicU64::new(0),
                state,
            }),
            options: Arc::new(options),
            route: None,
        }
    }

    /// Sets the accessor consulted when `revalidate_current_page` is on.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_route<R>(mut self, route: R) -> Self
    where
        R: RouteAccessor + 'static,
    {
        self.route = Some(Arc::new(route));
        self
    }

    /// Runs the action once and records the outcome.
    pub async fn trigger(&self, input: A::Raw) -> TriggerOutcome<A::Output> {
        let persist = self.options.persist_data;
        let mut generation = 0;
        self.shared.state.send_modify(|state| {
            generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.is_running = true;
            state.error = None;
            if !persist {
                state.data = None;
            }
        });

        let paths = self.effective_paths();
        let key = &self.shared.action.metadata().key;
        tracing::debug!(action = %key, generation, paths = %paths, "run started");

        let result = self.shared.action.invoke(input, paths).await;

        let policy = self.options.failure_policy;
        let mut outcome = TriggerOutcome::Superseded;
        self.shared.state.send_if_modified(|state| {
            if self.shared.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            state.is_running = false;
            match result {
                Ok(response) => {
                    let data = response.into_payload();
                    state.data = Some(data.clone());
                    outcome = TriggerOutcome::Completed(data);
                }
                Err(err) => {
                    if policy.clears_data(persist) {
                        state.data = None;
                    }
                    state.error = Some(err.clone());
                    outcome = TriggerOutcome::Failed(err);
                }
            }
            true
        });

        match &outcome {
            TriggerOutcome::Completed(_) => {
                tracing::debug!(action = %key, generation, "run completed");
            }
            TriggerOutcome::Failed(err) => {
                tracing::debug!(action = %key, generation, error = %err, "run failed");
            }
            TriggerOutcome::Superseded => {
                tracing::debug!(action = %key, generation, "stale run discarded");
            }
        }
        outcome
    }

    /// Returns to `Idle` and discards any run still in flight.
    pub fn reset(&self) {
        self.shared.state.send_modify(|state| {
            self.shared.generation.fetch_add(1, Ordering::SeqCst);
            *state = CallState::idle();
        });
    }

    /// The path list the next run will use: the configured paths, then the
    /// current route if `revalidate_current_page` is set.
    pub fn effective_paths(&self) -> RevalidationPaths {
        let mut paths: RevalidationPaths = self.options.revalidation_paths.iter().collect();
        if self.options.revalidate_current_page {
            match &self.route {
                Some(route) => paths.push(route.current_route()),
                None => tracing::warn!(
                    "revalidate_current_page is set but no route accessor is configured"
                ),
            }
        }
        paths
    }

    /// Snapshot of the whole state.
    pub fn state(&self) -> CallState<A::Output> {
        self.shared.state.borrow().clone()
    }

    /// Payload of the last applied successful run.
    pub fn data(&self) -> Option<A::Output> {
        self.shared.state.borrow().data.clone()
    }

    /// `true` while the most recent run is in flight.
    pub fn is_running(&self) -> bool {
        self.shared.state.borrow().is_running
    }

    /// Error of the last applied run.
    pub fn error(&self) -> Option<ActionError> {
        self.shared.state.borrow().error.clone()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> CallPhase {
        self.shared.state.borrow().phase()
    }

    /// A receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<CallState<A::Output>> {
        self.shared.state.subscribe()
    }

    /// The options this caller was built with.
    pub fn options(&self) -> &CallerOptions {
        &self.options
    }

    /// The wrapped action.
    pub fn action(&self) -> &A {
        &self.shared.action
    }
}

impl<A: Invoke> Clone for StatefulCaller<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            options: Arc::clone(&self.options),
            route: self.route.clone(),
        }
    }
}

impl<A: Invoke> fmt::Debug for StatefulCaller<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatefulCaller")
            .field("action", &self.shared.action.metadata().key)
            .field("options", &self.options)
            .field("has_route", &self.route.is_some())
            .field("generation", &self.shared.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
