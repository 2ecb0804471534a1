//! Handler responses and the rule that decides whether they revalidate.

use serde::{Deserialize, Serialize};

/// What a handler returns: an application payload plus an optional
/// revalidation flag.
///
/// Serializes flat, the payload's fields next to an optional `"revalidate"`
/// key, which is the shape clients of the original JSON API expect.
///
/// ```
/// use safeact_action::ActionResponse;
/// use serde_json::json;
///
/// let response = ActionResponse::revalidating(json!({"message": "sent"}));
/// assert_eq!(
///     serde_json::to_value(&response).unwrap(),
///     json!({"message": "sent", "revalidate": true})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse<O> {
    /// Application-defined payload.
    #[serde(flatten)]
    pub payload: O,
    /// Revalidation flag. `None` means the handler did not opt in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revalidate: Option<bool>,
}

impl<O> ActionResponse<O> {
    /// A response that does not ask for revalidation.
    pub fn new(payload: O) -> Self {
        Self {
            payload,
            revalidate: None,
        }
    }

    /// A response flagged with `revalidate: true`.
    pub fn revalidating(payload: O) -> Self {
        Self {
            payload,
            revalidate: Some(true),
        }
    }

    /// Sets the flag explicitly, including `false`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_revalidate(mut self, revalidate: bool) -> Self {
        self.revalidate = Some(revalidate);
        self
    }

    /// Borrows the payload.
    pub fn payload(&self) -> &O {
        &self.payload
    }

    /// Drops the flag and returns the payload.
    pub fn into_payload(self) -> O {
        self.payload
    }

    /// Maps the payload, keeping the flag.
    pub fn map<U>(self, f: impl FnOnce(O) -> U) -> ActionResponse<U> {
        ActionResponse {
            payload: f(self.payload),
            revalidate: self.revalidate,
        }
    }
}

/// How a response's flag is turned into a revalidate / don't decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevalidationTrigger {
    /// Revalidate only when the flag is `Some(true)`.
    #[default]
    FlagValue,
    /// Revalidate whenever the flag is present, even `Some(false)`.
    KeyPresence,
}

impl RevalidationTrigger {
    /// Decides whether a response with this flag revalidates.
    pub fn should_revalidate(self, flag: Option<bool>) -> bool {
        match self {
            Self::FlagValue => flag == Some(true),
            Self::KeyPresence => flag.is_some(),
        }
    }
}
