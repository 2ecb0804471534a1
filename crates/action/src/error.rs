use safeact_validator::foundation::ValidationError;

use crate::revalidate::RevalidationError;

/// Error type for all action operations.
///
/// Two kinds of failure exist. A [`Validation`](Self::Validation) error means
/// the input schema rejected the input and the handler never ran. Every
/// other variant is a handler-kind failure: the handler itself failed, or
/// the revalidation that followed it did. None of them are retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ActionError {
    /// The input schema rejected the input.
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    /// The handler reported a failure.
    #[error("handler: {message}")]
    Handler {
        /// Human-readable error message.
        message: String,
        /// Optional structured details about the failure.
        details: Option<serde_json::Value>,
    },

    /// The cache-invalidation primitive failed for `path`.
    ///
    /// Paths before `path` in the list have already been revalidated; the
    /// ones after it have not.
    #[error("revalidation of `{path}` failed: {message}")]
    Revalidation {
        /// The path whose revalidation failed.
        path: String,
        /// Reason reported by the revalidator.
        message: String,
    },
}

impl ActionError {
    /// Create a handler failure.
    pub fn handler(msg: impl Into<String>) -> Self {
        Self::Handler {
            message: msg.into(),
            details: None,
        }
    }

    /// Create a handler failure with structured details.
    pub fn handler_with_details(msg: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Handler {
            message: msg.into(),
            details: Some(details),
        }
    }

    /// Returns `true` if the input was rejected before the handler ran.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` for failures raised by the handler or by revalidation.
    pub fn is_handler_failure(&self) -> bool {
        matches!(self, Self::Handler { .. } | Self::Revalidation { .. })
    }

    /// The validation error, if the input was rejected.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }

    /// Extract the structured handler details, if present.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Handler { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

impl From<RevalidationError> for ActionError {
    fn from(err: RevalidationError) -> Self {
        Self::Revalidation {
            path: err.path,
            message: err.message,
        }
    }
}
