//! The demo "send alert" action.

use safeact_action::{
    ActionError, ActionMetadata, ActionResponse, RevalidationPaths, RevalidationTrigger,
    Revalidator, SafeAction,
};
use safeact_validator::foundation::Typed;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Senders that may not send alerts.
const BLOCKED_SENDERS: &[&str] = &["Ethan"];

/// Input of the form. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertInput {
    /// Sender name.
    pub from: String,
    /// Alert text.
    pub alert: String,
}

/// What the action answers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlertResponse {
    /// The sender is blocked.
    Failure {
        /// Why the alert was refused.
        failure: Failure,
    },
    /// The alert was sent.
    Message {
        /// Rendered alert.
        message: String,
    },
}

/// A refusal reported in the payload rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Human-readable reason.
    pub message: String,
}

impl AlertResponse {
    /// The rendered alert of a successful send.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message { message } => Some(message),
            Self::Failure { .. } => None,
        }
    }
}

/// Refuses blocked senders; otherwise renders the alert and asks for
/// revalidation.
pub async fn send_alert(
    input: AlertInput,
    _paths: RevalidationPaths,
) -> Result<ActionResponse<AlertResponse>, ActionError> {
    if BLOCKED_SENDERS.contains(&input.from.as_str()) {
        tracing::info!(from = %input.from, "alert refused");
        return Ok(ActionResponse::new(AlertResponse::Failure {
            failure: Failure {
                message: format!("{} is not allowed to send alerts!", input.from),
            },
        }));
    }

    tracing::info!(from = %input.from, "alert sent");
    Ok(ActionResponse::revalidating(AlertResponse::Message {
        message: format!("From: {}\nAlert: {}", input.from, input.alert),
    }))
}

/// The action: JSON input validated into [`AlertInput`], then [`send_alert`].
pub fn send_alert_action<V>(
    revalidator: V,
    trigger: RevalidationTrigger,
) -> SafeAction<Value, AlertInput, AlertResponse>
where
    V: Revalidator + 'static,
{
    SafeAction::validated(Typed::<AlertInput>::new(), send_alert)
        .with_metadata(ActionMetadata::new(
            "alerts.send",
            "Send Alert",
            "Sends an alert unless the sender is blocked",
        ))
        .with_revalidator(revalidator)
        .with_trigger(trigger)
}
