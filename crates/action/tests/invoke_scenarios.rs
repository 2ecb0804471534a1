//! End-to-end behaviour of `SafeAction::invoke` against an in-process route cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rstest::rstest;
use safeact_action::prelude::*;
use safeact_validator::prelude::*;
use serde_json::{Value, json};

/// The "send alert" handler: refuses Ethan, otherwise echoes and asks for
/// revalidation.
struct SendAlert {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler<Value, Value> for SendAlert {
    async fn call(
        &self,
        input: Value,
        _paths: RevalidationPaths,
    ) -> Result<ActionResponse<Value>, ActionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let from = input["from"].as_str().unwrap_or_default();
        let alert = input["alert"].as_str().unwrap_or_default();

        if from == "Ethan" {
            return Ok(ActionResponse::new(json!({
                "failure": {"message": "Ethan is not allowed to send alerts!"}
            })));
        }
        Ok(ActionResponse::revalidating(json!({
            "message": format!("From: {from}\nAlert: {alert}")
        })))
    }
}

fn send_alert(cache: &Arc<RouteCache>) -> (SafeAction<Value, Value, Value>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let action = SafeAction::validated(
        ObjectSchema::new().string("from").string("alert"),
        SendAlert {
            calls: Arc::clone(&calls),
        },
    )
    .with_metadata(ActionMetadata::new("alerts.send", "Send Alert", "Sends an alert"))
    .with_revalidator(Arc::clone(cache));
    (action, calls)
}

async fn unflagged(input: i32, _paths: RevalidationPaths) -> Result<ActionResponse<i32>, ActionError> {
    Ok(ActionResponse::new(input))
}

async fn flagged_false(input: i32, _paths: RevalidationPaths) -> Result<ActionResponse<i32>, ActionError> {
    Ok(ActionResponse::new(input).with_revalidate(false))
}

async fn flagged(input: i32, _paths: RevalidationPaths) -> Result<ActionResponse<i32>, ActionError> {
    Ok(ActionResponse::revalidating(input))
}

#[tokio::test]
async fn refused_sender_gets_failure_payload_and_no_revalidation() {
    let cache = Arc::new(RouteCache::new());
    let (action, calls) = send_alert(&cache);

    let response = action
        .invoke(json!({"from": "Ethan", "alert": "x"}), ["/"].into())
        .await
        .unwrap();

    assert_eq!(
        response.payload,
        json!({"failure": {"message": "Ethan is not allowed to send alerts!"}})
    );
    assert_eq!(response.revalidate, None);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cache.revalidations().is_empty());
}

#[tokio::test]
async fn accepted_alert_revalidates_root_once() {
    let cache = Arc::new(RouteCache::new());
    let (action, _) = send_alert(&cache);

    let response = action
        .invoke(json!({"from": "Bob", "alert": "Fire"}), ["/"].into())
        .await
        .unwrap();

    assert_eq!(response.payload, json!({"message": "From: Bob\nAlert: Fire"}));
    assert_eq!(response.revalidate, Some(true));
    assert_eq!(cache.revalidations(), vec!["/"]);
    assert_eq!(cache.count("/"), 1);
}

#[tokio::test]
async fn unknown_keys_are_stripped_before_the_handler() {
    let cache = Arc::new(RouteCache::new());
    let (action, _) = send_alert(&cache);

    let response = action
        .invoke_default(json!({"from": "Bob", "alert": "Fire", "admin": true}))
        .await
        .unwrap();
    assert_eq!(response.payload, json!({"message": "From: Bob\nAlert: Fire"}));
}

#[tokio::test]
async fn invalid_input_never_reaches_the_handler() {
    let cache = Arc::new(RouteCache::new());
    let (action, calls) = send_alert(&cache);

    let err = action
        .invoke(json!({"from": "Bob", "alert": 7}), ["/"].into())
        .await
        .unwrap_err();

    assert!(err.is_validation());
    let validation = err.validation_error().unwrap();
    assert_eq!(validation.code.as_ref(), "invalid_object");
    assert_eq!(validation.nested.len(), 1);
    assert_eq!(validation.nested[0].field.as_deref(), Some("alert"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(cache.revalidations().is_empty());
}

#[tokio::test]
async fn non_object_input_is_rejected() {
    let cache = Arc::new(RouteCache::new());
    let (action, calls) = send_alert(&cache);

    let err = action.invoke_default(json!("Fire")).await.unwrap_err();
    assert_eq!(err.validation_error().unwrap().code.as_ref(), "type_mismatch");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[case::empty(vec![])]
#[case::root(vec!["/"])]
#[case::several(vec!["/", "/alerts", "/inbox"])]
#[tokio::test]
async fn unflagged_responses_never_revalidate(#[case] paths: Vec<&str>) {
    let cache = Arc::new(RouteCache::new());
    let action = SafeAction::new(unflagged).with_revalidator(Arc::clone(&cache));

    action.invoke(1, paths.into()).await.unwrap();

    assert!(cache.revalidations().is_empty());
}

#[rstest]
#[case::single(vec!["/"])]
#[case::ordered(vec!["/inbox", "/", "/alerts"])]
#[case::duplicates(vec!["/", "/alerts", "/"])]
#[tokio::test]
async fn flagged_responses_revalidate_each_path_in_order(#[case] paths: Vec<&str>) {
    let cache = Arc::new(RouteCache::new());
    let action = SafeAction::new(flagged).with_revalidator(Arc::clone(&cache));

    action.invoke(1, paths.clone().into()).await.unwrap();

    assert_eq!(cache.revalidations(), paths);
}

#[tokio::test]
async fn repeated_invocations_run_the_handler_each_time() {
    let cache = Arc::new(RouteCache::new());
    let (action, calls) = send_alert(&cache);
    let input = json!({"from": "Bob", "alert": "Fire"});

    let first = action.invoke_default(input.clone()).await.unwrap();
    let second = action.invoke_default(input).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(cache.revalidations().is_empty());
}

#[rstest]
#[case::flag_value(RevalidationTrigger::FlagValue, 0)]
#[case::key_presence(RevalidationTrigger::KeyPresence, 2)]
#[tokio::test]
async fn explicit_false_flag_depends_on_trigger(
    #[case] trigger: RevalidationTrigger,
    #[case] expected: usize,
) {
    let cache = Arc::new(RouteCache::new());
    let action = SafeAction::new(flagged_false)
        .with_revalidator(Arc::clone(&cache))
        .with_trigger(trigger);

    let response = action.invoke(1, ["/", "/alerts"].into()).await.unwrap();

    assert_eq!(response.revalidate, Some(false));
    assert_eq!(cache.revalidations().len(), expected);
}

#[tokio::test]
async fn revalidation_failure_stops_the_loop() {
    let cache = Arc::new(RouteCache::strict(["/", "/alerts"]));
    let action = SafeAction::new(flagged).with_revalidator(Arc::clone(&cache));

    let err = action
        .invoke(1, ["/", "/missing", "/alerts"].into())
        .await
        .unwrap_err();

    assert!(err.is_handler_failure());
    assert_eq!(
        err,
        ActionError::Revalidation {
            path: "/missing".into(),
            message: "route not found".into(),
        }
    );
    assert_eq!(cache.revalidations(), vec!["/"]);
}

#[tokio::test]
async fn handler_failure_skips_revalidation() {
    async fn failing(_: i32, _paths: RevalidationPaths) -> Result<ActionResponse<i32>, ActionError> {
        Err(ActionError::handler("boom"))
    }

    let cache = Arc::new(RouteCache::new());
    let action = SafeAction::new(failing).with_revalidator(Arc::clone(&cache));

    let err = action.invoke(1, ["/"].into()).await.unwrap_err();

    assert_eq!(err, ActionError::handler("boom"));
    assert!(cache.revalidations().is_empty());
}

#[tokio::test]
async fn handler_receives_the_paths() {
    async fn count_paths(_: (), paths: RevalidationPaths) -> Result<ActionResponse<usize>, ActionError> {
        Ok(ActionResponse::new(paths.len()))
    }

    let action = SafeAction::new(count_paths);
    let response = action.invoke((), ["/a", "/b"].into()).await.unwrap();
    assert_eq!(response.payload, 2);
}

#[tokio::test]
async fn typed_schema_feeds_a_struct_handler() {
    #[derive(Debug, serde::Deserialize)]
    struct Alert {
        from: String,
        alert: String,
    }

    async fn format_alert(input: Alert, _paths: RevalidationPaths) -> Result<ActionResponse<String>, ActionError> {
        Ok(ActionResponse::revalidating(format!("{}: {}", input.from, input.alert)))
    }

    let cache = Arc::new(RouteCache::new());
    let action = SafeAction::validated(Typed::<Alert>::new(), format_alert)
        .with_revalidator(Arc::clone(&cache));

    let response = action
        .invoke(json!({"from": "Bob", "alert": "Fire"}), ["/"].into())
        .await
        .unwrap();
    assert_eq!(response.into_payload(), "Bob: Fire");

    let err = action.invoke_default(json!({"from": "Bob"})).await.unwrap_err();
    assert_eq!(err.validation_error().unwrap().code.as_ref(), "invalid_input");
}
