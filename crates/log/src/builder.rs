//! Turns a [`Config`] into an installed subscriber.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

// Each `fmt::Layer` formatter is its own type, so the shared decorations
// are applied by macro before the layer is boxed.
macro_rules! decorate {
    ($layer:expr, $display:expr) => {{
        let display = $display;
        let layer = $layer
            .with_target(display.target)
            .with_file(display.source)
            .with_line_number(display.source);
        if display.time {
            layer.boxed()
        } else {
            layer.without_time().boxed()
        }
    }};
}

/// Assembles and installs the global subscriber.
///
/// ```no_run
/// use safeact_log::{Config, Format, LoggerBuilder};
///
/// let _guard = LoggerBuilder::from_config(Config::production())
///     .with_level("warn,safeact_action=debug")
///     .with_format(Format::Compact)
///     .build()?;
/// # Ok::<(), safeact_log::LogError>(())
/// ```
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    config: Config,
}

/// Keeps the root span entered for as long as it lives.
///
/// Hold it in `main` until the process is done logging.
#[derive(Debug)]
#[must_use = "dropping the guard exits the root span"]
pub struct LoggerGuard {
    _root_span: Option<tracing::span::EnteredSpan>,
}

impl LoggerGuard {
    pub(crate) const fn noop() -> Self {
        Self { _root_span: None }
    }
}

impl LoggerBuilder {
    /// Starts from `config`.
    pub const fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Replaces the filter directives.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    /// Replaces the line layout.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    /// Settings [`build`](Self::build) will use.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })
    }

    fn fmt_layer(&self) -> BoxedLayer {
        let display = &self.config.display;
        let base = tracing_subscriber::fmt::layer().with_writer(self.config.writer.make_writer());
        match self.config.format {
            Format::Pretty => decorate!(base.pretty().with_ansi(display.colors), display),
            Format::Compact => decorate!(base.compact().with_ansi(display.colors), display),
            Format::Json => decorate!(
                base.json()
                    .with_ansi(false)
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true),
                display
            ),
        }
    }

    /// Installs the subscriber and opens the root span.
    ///
    /// # Errors
    ///
    /// [`LogError::Filter`] for unparsable directives, checked before
    /// anything is installed; [`LogError::AlreadyInitialised`] when the
    /// process already has a global subscriber.
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = self.filter()?;

        tracing_subscriber::registry()
            .with(self.fmt_layer())
            .with(filter)
            .try_init()
            .map_err(|_| LogError::AlreadyInitialised)?;

        let fields = &self.config.fields;
        let root_span = (!fields.is_empty()).then(|| {
            tracing::info_span!(
                "app",
                service = or_blank(fields.service.as_ref()),
                env = or_blank(fields.env.as_ref()),
                version = or_blank(fields.version.as_ref()),
                instance = or_blank(fields.instance.as_ref())
            )
            .entered()
        });

        tracing::debug!(level = %self.config.level, format = %self.config.format, "logger ready");
        Ok(LoggerGuard {
            _root_span: root_span,
        })
    }
}

fn or_blank(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}
