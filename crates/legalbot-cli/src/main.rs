//! LegalBot CLI - Terminal client for the LegalBot legal assistant backend.

use clap::Parser;
use legalbot_cli::commands;
use legalbot_cli::repl;
use legalbot_cli::{Cli, Command, Config, Formatter};
use legalbot_sdk::{Assistant, HttpTransport};
use std::sync::Arc;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> legalbot_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = Config::path()?;
    let mut config = Config::load_from(&config_path).unwrap_or_else(|e| {
        warn!("Ignoring unreadable config {}: {}", config_path.display(), e);
        Config::default()
    });

    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &config_path, &formatter)?;
        }
        Some(Command::Domains) => {
            commands::execute_domains(&formatter)?;
        }
        command => {
            let backend_url = config.backend_url(cli.url.as_deref())?;
            debug!("Using backend {}", backend_url);

            let transport = HttpTransport::new(&backend_url)?;
            let assistant = Assistant::with_catalog(Arc::new(transport), config.citation_catalog()?);

            match command {
                Some(Command::Ask(args)) => {
                    commands::execute_ask(args, &assistant, &formatter).await?;
                }
                _ => {
                    let history_path = Config::dir()?.join("history.txt");
                    repl::run_repl(&assistant, &history_path, config.settings.history_size, &formatter)
                        .await?;
                }
            }
        }
    }

    Ok(())
}

/// Log to stderr so answers on stdout stay clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
