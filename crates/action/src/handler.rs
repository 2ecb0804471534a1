//! The user-supplied function behind an action.

use std::future::Future;

use async_trait::async_trait;

use crate::error::ActionError;
use crate::paths::RevalidationPaths;
use crate::response::ActionResponse;

/// Performs the actual work of an action on already-validated input.
///
/// Receives the revalidation paths of the current invocation so it can
/// inspect them; whether they get revalidated is decided by the flag on the
/// returned [`ActionResponse`].
///
/// Implemented for every `async fn(I, RevalidationPaths) -> Result<ActionResponse<O>, ActionError>`
/// and for closures returning such a future.
///
/// ```
/// use safeact_action::{ActionError, ActionResponse, Handler, RevalidationPaths};
///
/// async fn shout(input: String, _paths: RevalidationPaths) -> Result<ActionResponse<String>, ActionError> {
///     Ok(ActionResponse::new(input.to_uppercase()))
/// }
///
/// fn assert_handler<H: Handler<String, String>>(_: &H) {}
/// assert_handler(&shout);
/// ```
#[async_trait]
pub trait Handler<I, O>: Send + Sync + 'static {
    /// Run the handler.
    async fn call(
        &self,
        input: I,
        paths: RevalidationPaths,
    ) -> Result<ActionResponse<O>, ActionError>;
}

#[async_trait]
impl<I, O, F, Fut> Handler<I, O> for F
where
    F: Fn(I, RevalidationPaths) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionResponse<O>, ActionError>> + Send + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    async fn call(
        &self,
        input: I,
        paths: RevalidationPaths,
    ) -> Result<ActionResponse<O>, ActionError> {
        (self)(input, paths).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn double(input: i64, _paths: RevalidationPaths) -> Result<ActionResponse<i64>, ActionError> {
        Ok(ActionResponse::new(input * 2))
    }

    struct Echo;

    #[async_trait]
    impl Handler<String, String> for Echo {
        async fn call(
            &self,
            input: String,
            paths: RevalidationPaths,
        ) -> Result<ActionResponse<String>, ActionError> {
            Ok(ActionResponse::new(format!("{input} {paths}")))
        }
    }

    #[tokio::test]
    async fn async_fn_is_a_handler() {
        let response = Handler::call(&double, 21, RevalidationPaths::new())
            .await
            .unwrap();
        assert_eq!(response.payload, 42);
    }

    #[tokio::test]
    async fn handler_sees_paths() {
        let response = Echo
            .call("paths:".into(), RevalidationPaths::from(["/", "/x"]))
            .await
            .unwrap();
        assert_eq!(response.payload, "paths: [/, /x]");
    }

    #[tokio::test]
    async fn closure_is_a_handler() {
        let handler = |input: u8, _paths: RevalidationPaths| async move {
            if input == 0 {
                Err(ActionError::handler("zero"))
            } else {
                Ok(ActionResponse::revalidating(input))
            }
        };
        let err = Handler::call(&handler, 0, RevalidationPaths::new())
            .await
            .unwrap_err();
        assert_eq!(err, ActionError::handler("zero"));
        let ok = Handler::call(&handler, 3, RevalidationPaths::new())
            .await
            .unwrap();
        assert_eq!(ok.revalidate, Some(true));
    }
}
