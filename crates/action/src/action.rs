//! The validating, revalidation-aware callable.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use safeact_validator::foundation::{Passthrough, Schema};
use tracing::Instrument;

use crate::error::ActionError;
use crate::handler::Handler;
use crate::metadata::ActionMetadata;
use crate::paths::RevalidationPaths;
use crate::response::{ActionResponse, RevalidationTrigger};
use crate::revalidate::{NoopRevalidator, Revalidator};

/// Anything that can be invoked like an action.
///
/// [`SafeAction`] is the main implementation; the stateful caller accepts
/// any `Invoke` so it can wrap test doubles or hand-written callables.
#[async_trait]
pub trait Invoke: Send + Sync + 'static {
    /// Raw, unvalidated input.
    type Raw: Send + 'static;
    /// Payload of the response.
    type Output: Send + 'static;

    /// Validate `raw`, run the handler, and revalidate `paths` if the
    /// response opts in.
    async fn invoke(
        &self,
        raw: Self::Raw,
        paths: RevalidationPaths,
    ) -> Result<ActionResponse<Self::Output>, ActionError>;

    /// Identity of the callable, for logging.
    fn metadata(&self) -> &ActionMetadata;

    /// [`invoke`](Invoke::invoke) with an empty path list.
    async fn invoke_default(
        &self,
        raw: Self::Raw,
    ) -> Result<ActionResponse<Self::Output>, ActionError> {
        self.invoke(raw, RevalidationPaths::new()).await
    }
}

#[async_trait]
impl<A: Invoke + ?Sized> Invoke for Arc<A> {
    type Raw = A::Raw;
    type Output = A::Output;

    async fn invoke(
        &self,
        raw: Self::Raw,
        paths: RevalidationPaths,
    ) -> Result<ActionResponse<Self::Output>, ActionError> {
        (**self).invoke(raw, paths).await
    }

    fn metadata(&self) -> &ActionMetadata {
        (**self).metadata()
    }
}

/// An input schema paired with a handler.
///
/// Invoking it:
///
/// 1. parses the raw input with the schema (a rejection is returned as
///    [`ActionError::Validation`] and the handler never runs);
/// 2. awaits the handler with the validated input and the paths;
/// 3. if the path list is non-empty and the [`RevalidationTrigger`] accepts
///    the response's flag, revalidates every path in order, stopping at the
///    first failure;
/// 4. returns the response unmodified.
///
/// Immutable once built and cheap to clone.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use safeact_action::prelude::*;
/// use safeact_validator::prelude::*;
///
/// async fn greet(name: String, _paths: RevalidationPaths) -> Result<ActionResponse<String>, ActionError> {
///     Ok(ActionResponse::revalidating(format!("hello {name}")))
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache = Arc::new(RouteCache::new());
/// let action = SafeAction::validated(not_blank().into_schema::<String>(), greet)
///     .with_revalidator(cache.clone());
///
/// let response = action.invoke("Bob".into(), ["/"].into()).await.unwrap();
/// assert_eq!(response.payload, "hello Bob");
/// assert_eq!(cache.revalidations(), vec!["/"]);
///
/// assert!(action.invoke("  ".into(), ["/"].into()).await.unwrap_err().is_validation());
/// # }
/// ```
pub struct SafeAction<R, I, O> {
    metadata: ActionMetadata,
    schema: Arc<dyn Schema<Raw = R, Output = I>>,
    validated: bool,
    handler: Arc<dyn Handler<I, O>>,
    revalidator: Arc<dyn Revalidator>,
    trigger: RevalidationTrigger,
}

impl<I, O> SafeAction<I, I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    /// An action without input validation; raw input reaches the handler
    /// unchanged.
    pub fn new<H>(handler: H) -> Self
    where
        H: Handler<I, O>,
    {
        Self::build(Passthrough::new(), false, handler)
    }
}

impl<R, I, O> SafeAction<R, I, O>
where
    R: Send + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    /// An action whose input is parsed by `schema` before `handler` runs.
    pub fn validated<S, H>(schema: S, handler: H) -> Self
    where
        S: Schema<Raw = R, Output = I> + 'static,
        H: Handler<I, O>,
    {
        Self::build(schema, true, handler)
    }

    fn build<S, H>(schema: S, validated: bool, handler: H) -> Self
    where
        S: Schema<Raw = R, Output = I> + 'static,
        H: Handler<I, O>,
    {
        Self {
            metadata: ActionMetadata::anonymous(),
            schema: Arc::new(schema),
            validated,
            handler: Arc::new(handler),
            revalidator: Arc::new(NoopRevalidator),
            trigger: RevalidationTrigger::default(),
        }
    }

    /// Sets the metadata used in logs.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_metadata(mut self, metadata: ActionMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets the cache-invalidation primitive. Defaults to [`NoopRevalidator`].
    #[must_use = "builder methods must be chained or built"]
    pub fn with_revalidator<V>(mut self, revalidator: V) -> Self
    where
        V: Revalidator + 'static,
    {
        self.revalidator = Arc::new(revalidator);
        self
    }

    /// Sets how the response flag is interpreted. Defaults to
    /// [`RevalidationTrigger::FlagValue`].
    #[must_use = "builder methods must be chained or built"]
    pub fn with_trigger(mut self, trigger: RevalidationTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Returns `true` if the action was built with an input schema.
    pub fn has_input_validation(&self) -> bool {
        self.validated
    }

    /// The configured revalidation trigger.
    pub fn trigger(&self) -> RevalidationTrigger {
        self.trigger
    }

    fn revalidate_all(&self, paths: &RevalidationPaths) -> Result<(), ActionError> {
        for path in paths {
            if let Err(err) = self.revalidator.revalidate(path) {
                tracing::warn!(path = %path, error = %err, "revalidation failed");
                return Err(err.into());
            }
            tracing::debug!(path = %path, "revalidated");
        }
        Ok(())
    }
}

#[async_trait]
impl<R, I, O> Invoke for SafeAction<R, I, O>
where
    R: Send + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    type Raw = R;
    type Output = O;

    async fn invoke(
        &self,
        raw: R,
        paths: RevalidationPaths,
    ) -> Result<ActionResponse<O>, ActionError> {
        let span = tracing::info_span!(
            "safe_action",
            key = %self.metadata.key,
            paths = paths.len(),
        );

        async move {
            let input = self.schema.parse(raw).map_err(|err| {
                tracing::debug!(error = %err, "input rejected");
                ActionError::Validation(err)
            })?;

            // The handler gets its own copy; `paths` is read-only from here.
            let response = self.handler.call(input, paths.clone()).await?;

            if !paths.is_empty() && self.trigger.should_revalidate(response.revalidate) {
                self.revalidate_all(&paths)?;
            }

            Ok(response)
        }
        .instrument(span)
        .await
    }

    fn metadata(&self) -> &ActionMetadata {
        &self.metadata
    }
}

impl<R, I, O> Clone for SafeAction<R, I, O> {
    fn clone(&self) -> Self {
        Self {
            metadata: self.metadata.clone(),
            schema: Arc::clone(&self.schema),
            validated: self.validated,
            handler: Arc::clone(&self.handler),
            revalidator: Arc::clone(&self.revalidator),
            trigger: self.trigger,
        }
    }
}

impl<R, I, O> fmt::Debug for SafeAction<R, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafeAction")
            .field("key", &self.metadata.key)
            .field("validated", &self.validated)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}
