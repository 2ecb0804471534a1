use std::fmt;

use safeact_action::ActionError;

/// Observable state of a [`StatefulCaller`](crate::StatefulCaller).
#[derive(Debug, Clone, PartialEq)]
pub struct CallState<O> {
    /// Payload of the last successful run, subject to the persistence
    /// options.
    pub data: Option<O>,
    /// `true` while a run is in flight.
    pub is_running: bool,
    /// Error of the last run, cleared when a new run starts.
    pub error: Option<ActionError>,
}

impl<O> CallState<O> {
    /// `{data: None, is_running: false, error: None}`.
    pub const fn idle() -> Self {
        Self {
            data: None,
            is_running: false,
            error: None,
        }
    }

    /// Lifecycle phase derived from the three fields.
    pub fn phase(&self) -> CallPhase {
        if self.is_running {
            CallPhase::Running
        } else if self.error.is_some() {
            CallPhase::Failed
        } else if self.data.is_some() {
            CallPhase::Succeeded
        } else {
            CallPhase::Idle
        }
    }
}

impl<O> Default for CallState<O> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Where a caller is in its lifecycle.
///
/// `Idle -> Running -> {Succeeded, Failed}`; the next trigger re-enters
/// `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallPhase {
    /// Nothing has run yet, or the caller was reset.
    Idle,
    /// A run is in flight.
    Running,
    /// The last run completed.
    Succeeded,
    /// The last run failed.
    Failed,
}

impl fmt::Display for CallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let state = CallState::<String>::default();
        assert_eq!(state, CallState::idle());
        assert_eq!(state.phase(), CallPhase::Idle);
    }

    #[test]
    fn running_wins_over_previous_outcome() {
        let state = CallState {
            data: Some(1),
            is_running: true,
            error: None,
        };
        assert_eq!(state.phase(), CallPhase::Running);
    }

    #[test]
    fn error_means_failed_even_with_data() {
        let state = CallState {
            data: Some(1),
            is_running: false,
            error: Some(ActionError::handler("boom")),
        };
        assert_eq!(state.phase(), CallPhase::Failed);
        assert_eq!(state.phase().to_string(), "failed");
    }
}
