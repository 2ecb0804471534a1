//! What the logger prints, how, and where.
//!
//! Every knob has an environment variable; [`Config::from_lookup`] reads
//! them through a closure so tests never touch the real environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::error::LogError;

/// Logger settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directives, e.g. `"info"` or `"warn,safeact_action=trace"`.
    pub level: String,
    /// Line layout.
    pub format: Format,
    /// Stream the lines go to.
    pub writer: WriterConfig,
    /// Per-line decorations.
    pub display: DisplayConfig,
    /// Recorded once on the root span.
    pub fields: Fields,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: Format::Compact,
            writer: WriterConfig::Stderr,
            display: DisplayConfig::default(),
            fields: Fields::default(),
        }
    }
}

/// Line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, for reading in a terminal.
    Pretty,
    /// One line per event.
    Compact,
    /// One JSON object per event.
    Json,
}

impl Format {
    /// Name accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, LogError> {
        [Self::Pretty, Self::Compact, Self::Json]
            .into_iter()
            .find(|format| s.eq_ignore_ascii_case(format.as_str()))
            .ok_or_else(|| {
                LogError::Config(format!(
                    "unknown format `{s}`, expected pretty, compact or json"
                ))
            })
    }
}

/// Output stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterConfig {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

impl WriterConfig {
    pub(crate) fn make_writer(self) -> BoxMakeWriter {
        match self {
            Self::Stderr => BoxMakeWriter::new(std::io::stderr),
            Self::Stdout => BoxMakeWriter::new(std::io::stdout),
        }
    }
}

/// Per-line decorations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Timestamp prefix.
    pub time: bool,
    /// `file:line` of the call site.
    pub source: bool,
    /// Module path of the call site.
    pub target: bool,
    /// ANSI colours; ignored for JSON.
    pub colors: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            source: cfg!(debug_assertions),
            target: true,
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// Identity of the running process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    /// Service name.
    pub service: Option<String>,
    /// Deployment, e.g. `staging`.
    pub env: Option<String>,
    /// Build version.
    pub version: Option<String>,
    /// Replica identifier.
    pub instance: Option<String>,
}

impl Fields {
    /// `true` when no field is set, in which case no root span is opened.
    pub const fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                service: None,
                env: None,
                version: None,
                instance: None,
            }
        )
    }
}

fn flag(value: &str) -> bool {
    !(value == "0" || value.eq_ignore_ascii_case("false"))
}

impl Config {
    /// Reads the process environment; see [`from_lookup`](Self::from_lookup).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from the variables `lookup` knows about.
    ///
    /// | variable | sets |
    /// |---|---|
    /// | `SAFEACT_LOG`, else `RUST_LOG` | `level` |
    /// | `SAFEACT_LOG_FORMAT` | `format` (unknown values mean compact) |
    /// | `SAFEACT_LOG_TIME`, `SAFEACT_LOG_SOURCE`, `SAFEACT_LOG_COLORS` | `display` (`0`/`false` turn off) |
    /// | `SAFEACT_SERVICE`, `SAFEACT_ENV`, `SAFEACT_VERSION`, `SAFEACT_INSTANCE` | `fields` |
    ///
    /// ```
    /// use safeact_log::{Config, Format};
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "RUST_LOG" => Some("warn".into()),
    ///     "SAFEACT_LOG_FORMAT" => Some("json".into()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.level, "warn");
    /// assert_eq!(config.format, Format::Json);
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("SAFEACT_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }
        if let Some(format) = lookup("SAFEACT_LOG_FORMAT") {
            config.format = format.parse().unwrap_or(Format::Compact);
        }

        let display = &mut config.display;
        for (key, slot) in [
            ("SAFEACT_LOG_TIME", &mut display.time),
            ("SAFEACT_LOG_SOURCE", &mut display.source),
            ("SAFEACT_LOG_COLORS", &mut display.colors),
        ] {
            if let Some(value) = lookup(key) {
                *slot = flag(&value);
            }
        }

        config.fields = Fields {
            service: lookup("SAFEACT_SERVICE"),
            env: lookup("SAFEACT_ENV"),
            version: lookup("SAFEACT_VERSION"),
            instance: lookup("SAFEACT_INSTANCE"),
        };
        config
    }

    /// Pretty, coloured, `debug` and up, with call sites.
    pub fn development() -> Self {
        Self {
            level: "debug".into(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// JSON, `info` and up, no colours.
    pub fn production() -> Self {
        Self {
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Compact, everything, no colours or timestamps.
    pub fn test() -> Self {
        Self {
            level: "trace".into(),
            display: DisplayConfig {
                colors: false,
                time: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }
}
