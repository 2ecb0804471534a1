//! Logger setup failures.

/// Result alias for logger setup.
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while setting up logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// The filter directives could not be parsed.
    #[error("invalid filter `{filter}`: {reason}")]
    Filter {
        /// The rejected directives.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A configuration value was not understood.
    #[error("configuration error: {0}")]
    Config(String),

    /// A global subscriber has already been installed in this process.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialised,
}
