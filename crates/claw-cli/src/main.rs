//! claw: configure agents for the agent controller from your terminal.
//!
//! Without a subcommand the interactive wizard opens in the configured
//! default mode.

mod cli;
mod commands;

use clap::Parser;
use claw_core::{ConfigStore, WizardMode};
use cli::{Cli, Commands};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let interactive = cli.command.as_ref().map_or(true, Commands::is_interactive);
    init_logging(cli.verbose, interactive);

    let config_store = ConfigStore::new();
    let mut config = config_store.load();
    config.apply_overrides(cli.url.clone(), cli.api_key.clone());
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    match cli.command {
        None => commands::new::run(&config, config.default_mode).await?,
        Some(Commands::New) => commands::new::run(&config, WizardMode::Standard).await?,
        Some(Commands::Init) => commands::new::run(&config, WizardMode::Orchestrator).await?,
        Some(Commands::Create {
            description,
            example,
            id,
            name,
            emoji,
            model,
            dry_run,
            json,
        }) => {
            let options = commands::create::CreateOptions {
                description: commands::create::resolve_description(description, example)?,
                id,
                name,
                emoji,
                model,
                dry_run,
                json,
            };
            commands::create::run(&config, options).await?;
        }
        Some(Commands::Models) => commands::models::run(&config).await?,
        Some(Commands::Login { key }) => {
            let key = key.or(cli.api_key).unwrap_or_default();
            commands::login::run(&config_store, &key)?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber. The interactive wizard owns the terminal,
/// so its logs go to `~/.claw/claw.log` instead of stderr.
fn init_logging(verbose: bool, interactive: bool) {
    let filter = if verbose {
        EnvFilter::new("claw=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("claw=warn"))
    };

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let log_path = ConfigStore::home().join("claw.log");
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(err) => eprintln!("warning: cannot open {}: {err}", log_path.display()),
    }
}
