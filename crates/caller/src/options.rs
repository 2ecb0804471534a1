use serde::{Deserialize, Serialize};

/// What happens to `data` when a run fails.
///
/// The default, [`ClearWhenPersisting`](Self::ClearWhenPersisting), clears
/// the previous result only when `persist_data` is set. A non-persisting
/// caller already cleared it when the run started, so under this policy a
/// failed run always ends with `data = None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureDataPolicy {
    /// Clear `data` on failure if `persist_data` is set.
    #[default]
    ClearWhenPersisting,
    /// Leave `data` as it was when the run failed.
    KeepPrevious,
    /// Always clear `data` on failure.
    AlwaysClear,
}

impl FailureDataPolicy {
    /// Whether a failed run clears `data`, given the caller's persist setting.
    pub fn clears_data(self, persist_data: bool) -> bool {
        match self {
            Self::ClearWhenPersisting => persist_data,
            Self::KeepPrevious => false,
            Self::AlwaysClear => true,
        }
    }
}

/// Configuration of a [`StatefulCaller`](crate::StatefulCaller).
///
/// Every field has a default, so a partial TOML or JSON document
/// deserializes:
///
/// ```
/// use safeact_caller::{CallerOptions, FailureDataPolicy};
///
/// let options: CallerOptions = serde_json::from_str(r#"{"persist_data": true}"#).unwrap();
/// assert!(options.persist_data);
/// assert!(!options.revalidate_current_page);
/// assert_eq!(options.failure_policy, FailureDataPolicy::ClearWhenPersisting);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallerOptions {
    /// Keep the previous `data` while a new run is in flight.
    pub persist_data: bool,
    /// Append the current route to the revalidation paths of every run.
    pub revalidate_current_page: bool,
    /// Paths revalidated after every run whose response opts in.
    pub revalidation_paths: Vec<String>,
    /// What a failed run does to `data`.
    pub failure_policy: FailureDataPolicy,
}

impl CallerOptions {
    /// All options at their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `persist_data`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_persist_data(mut self, persist: bool) -> Self {
        self.persist_data = persist;
        self
    }

    /// Sets `revalidate_current_page`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_revalidate_current_page(mut self, revalidate: bool) -> Self {
        self.revalidate_current_page = revalidate;
        self
    }

    /// Appends one path to `revalidation_paths`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_revalidation_path(mut self, path: impl Into<String>) -> Self {
        self.revalidation_paths.push(path.into());
        self
    }

    /// Replaces `revalidation_paths`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_revalidation_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.revalidation_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the failure policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_failure_policy(mut self, policy: FailureDataPolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}
