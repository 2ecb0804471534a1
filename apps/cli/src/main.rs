//! # safeact CLI
//!
//! Runs the "send alert" demo action through a stateful caller and prints
//! the resulting state.

mod alert;
mod cli;
mod config;
mod report;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use safeact_action::RouteCache;
use safeact_caller::{StatefulCaller, StaticRoute};
use serde_json::{Value, json};

use crate::alert::AlertResponse;
use crate::cli::{Cli, Command, SendAlertArgs};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        Command::SendAlert(args) => {
            let config = AppConfig::load(&cli)?;
            let _guard = safeact_log::init_with(config.log.clone())?;
            send_alert(&config, args).await
        }
        Command::Config => {
            let config = AppConfig::load(&cli)?;
            println!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "safeact", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn send_alert(config: &AppConfig, args: &SendAlertArgs) -> anyhow::Result<ExitCode> {
    let cache = Arc::new(if config.route.strict {
        RouteCache::strict(config.route.known.iter().cloned())
    } else {
        RouteCache::new()
    });

    let mut options = config.caller.clone();
    options.revalidation_paths.extend(args.paths.iter().cloned());
    let route = args.route.as_deref().unwrap_or(&config.route.current);

    let caller = StatefulCaller::with_options(
        alert::send_alert_action(Arc::clone(&cache), config.trigger),
        options,
    )
    .with_route(StaticRoute::new(route));

    let input = match &args.input {
        Some(raw) => serde_json::from_str::<Value>(raw).context("--input is not valid JSON")?,
        None => json!({"from": args.from, "alert": args.alert}),
    };

    tracing::debug!(paths = %caller.effective_paths(), "sending alert");
    caller.trigger(input).await;

    let state = caller.state();
    if let Some(message) = state.data.as_ref().and_then(AlertResponse::message) {
        println!("{message}\n");
    }
    println!("{}", report::render(&state, &cache.revalidations())?);

    Ok(if state.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
