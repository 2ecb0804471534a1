//! # safeact-log
//!
//! `tracing-subscriber` setup shared by the safeact binaries and tests.
//!
//! ```no_run
//! use safeact_log::{Config, Format};
//!
//! fn main() -> Result<(), safeact_log::LogError> {
//!     // SAFEACT_LOG / RUST_LOG if set, else a preset for the build profile
//!     let _guard = safeact_log::auto_init()?;
//!     safeact_log::info!(port = 8080, "starting");
//!     Ok(())
//! }
//! ```
//!
//! A config can also be spelled out and passed to [`init_with`]:
//!
//! ```no_run
//! # use safeact_log::{Config, Format};
//! let _guard = safeact_log::init_with(Config {
//!     format: Format::Json,
//!     ..Config::production()
//! });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Fields, Format, WriterConfig};
pub use error::{LogError, LogResult};

pub use tracing::{debug, error, info, instrument, span, trace, warn};

/// Everything a binary usually needs.
pub mod prelude {
    pub use crate::{
        Config, Format, LogError, LogResult, auto_init, debug, error, info, init, init_with,
        instrument, span, trace, warn,
    };

    pub use tracing::{Span, field};
}

/// Installs the environment's config if one is given, else a profile preset.
///
/// With `SAFEACT_LOG` or `RUST_LOG` set this is [`Config::from_env`];
/// otherwise [`Config::development`] for debug builds and
/// [`Config::production`] for release builds.
pub fn auto_init() -> LogResult<LoggerGuard> {
    let from_env = ["SAFEACT_LOG", "RUST_LOG"]
        .into_iter()
        .any(|key| std::env::var_os(key).is_some());

    init_with(match (from_env, cfg!(debug_assertions)) {
        (true, _) => Config::from_env(),
        (false, true) => Config::development(),
        (false, false) => Config::production(),
    })
}

/// Installs [`Config::default`].
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Installs `config`.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Installs [`Config::test`] if nothing is installed yet; never fails.
pub fn init_test() -> LoggerGuard {
    if tracing::dispatcher::has_been_set() {
        return LoggerGuard::noop();
    }
    init_with(Config::test()).unwrap_or_else(|_| LoggerGuard::noop())
}
