//! Layered application configuration: defaults, then an optional TOML file,
//! then `SAFEACT_APP_*` environment variables, then command-line flags.

use std::path::Path;

use anyhow::{Context, bail};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use safeact_action::RevalidationTrigger;
use safeact_caller::CallerOptions;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Environment prefix; nested keys are separated by `__`, e.g.
/// `SAFEACT_APP_CALLER__PERSIST_DATA=false`.
pub const ENV_PREFIX: &str = "SAFEACT_APP_";

/// Everything the binary can be configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How the action reads the response's revalidate flag.
    pub trigger: RevalidationTrigger,
    /// Logging.
    pub log: safeact_log::Config,
    /// Options of the stateful caller wrapping the demo action.
    pub caller: CallerOptions,
    /// The in-process route cache.
    pub route: RouteConfig,
}

/// The page the demo runs on and the routes the cache knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Route the alert form is rendered on.
    pub current: String,
    /// Reject revalidation of routes not listed in `known`.
    pub strict: bool,
    /// Routes registered with a strict cache.
    pub known: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trigger: RevalidationTrigger::default(),
            log: safeact_log::Config {
                level: "warn".to_string(),
                ..safeact_log::Config::default()
            },
            // The alert form persists data and revalidates its own page.
            caller: CallerOptions::new()
                .with_persist_data(true)
                .with_revalidate_current_page(true),
            route: RouteConfig::default(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            current: "/".to_string(),
            strict: false,
            known: vec!["/".to_string()],
        }
    }
}

impl AppConfig {
    /// Defaults, the file at `path` if any, then the environment.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads the configuration for `cli`, flags last.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        if let Some(path) = &cli.config
            && !path.is_file()
        {
            bail!("config file `{}` does not exist", path.display());
        }

        let mut config: Self = Self::figment(cli.config.as_deref())
            .extract()
            .context("invalid configuration")?;
        config.apply_flags(cli);
        Ok(config)
    }

    fn apply_flags(&mut self, cli: &Cli) {
        if let Some(level) = &cli.log_level {
            self.log.level.clone_from(level);
        }
        if let Some(format) = cli.log_format {
            self.log.format = format;
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("cannot render configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use figment::providers::{Format as _, Toml};
    use pretty_assertions::assert_eq;
    use safeact_caller::FailureDataPolicy;

    #[test]
    fn defaults_match_the_alert_form() {
        let config: AppConfig = AppConfig::figment(None).extract().unwrap();
        assert!(config.caller.persist_data);
        assert!(config.caller.revalidate_current_page);
        assert_eq!(config.route.current, "/");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: AppConfig = AppConfig::figment(None)
            .merge(Toml::string(
                r#"
                trigger = "key_presence"

                [caller]
                persist_data = false
                failure_policy = "keep_previous"
                revalidation_paths = ["/alerts"]

                [route]
                current = "/inbox"
                strict = true
                known = ["/inbox", "/alerts"]
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.trigger, RevalidationTrigger::KeyPresence);
        assert!(!config.caller.persist_data);
        assert!(config.caller.revalidate_current_page);
        assert_eq!(config.caller.failure_policy, FailureDataPolicy::KeepPrevious);
        assert_eq!(config.caller.revalidation_paths, vec!["/alerts"]);
        assert_eq!(config.route.current, "/inbox");
        assert!(config.route.strict);
    }

    #[test]
    fn flags_win() {
        let cli = Cli::parse_from(["safeact", "--log-level", "debug", "--log-format", "json", "config"]);
        let mut config = AppConfig::default();
        config.apply_flags(&cli);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, safeact_log::Format::Json);
    }

    #[test]
    fn renders_back_to_equal_config() {
        let config = AppConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: AppConfig = Figment::from(Toml::string(&rendered)).extract().unwrap();
        assert_eq!(parsed, config);
    }
}
