use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use safeact_log::Format;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "safeact")]
#[command(about = "Run safe actions through a stateful caller")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, short = 'c', global = true, env = "SAFEACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter directives (e.g. "debug" or "info,safeact_action=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_parser = parse_format)]
    pub log_format: Option<Format>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send an alert through the demo action, like submitting the alert form
    SendAlert(SendAlertArgs),
    /// Print the effective configuration as TOML
    Config,
    /// Generate shell completions
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Arguments of `send-alert`.
#[derive(Args, Debug)]
pub struct SendAlertArgs {
    /// Sender name
    #[arg(long, default_value = "Ethan")]
    pub from: String,

    /// Alert text
    #[arg(long, default_value = "Alert")]
    pub alert: String,

    /// Raw JSON input; replaces --from and --alert and goes through validation as is
    #[arg(long, conflicts_with_all = ["from", "alert"])]
    pub input: Option<String>,

    /// Route the form is rendered on (overrides `route.current`)
    #[arg(long)]
    pub route: Option<String>,

    /// Extra path to revalidate; may be repeated
    #[arg(long = "path", value_name = "PATH")]
    pub paths: Vec<String>,
}

fn parse_format(s: &str) -> Result<Format, String> {
    s.parse().map_err(|e: safeact_log::LogError| e.to_string())
}
