use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use complimo::application::config::AppConfig;
use complimo::application::services::{
    ComplianceOrchestrator, ConversationManager, PollerSettings, TelemetryPoller,
};
use complimo::infrastructure::http::HttpBackend;
use complimo::presentation::cli::app::{Cli, Commands};
use complimo::presentation::cli::commands::chat::{run_chat, run_chat_once};
use complimo::presentation::cli::commands::check::run_check;
use complimo::presentation::cli::commands::documents::run_documents;
use complimo::presentation::cli::commands::health::run_health;
use complimo::presentation::cli::commands::watch::run_watch;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  COMPLIMO · HVAC Compliance".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };

    // Manual DI: main.rs is the only place that knows concrete types
    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    tracing::debug!(base_url = backend.base_url(), "backend configured");

    match cli.command {
        Some(Commands::Watch {
            interval_ms,
            polls,
            json,
        }) => {
            let mut telemetry = config.telemetry.clone();
            if let Some(ms) = interval_ms {
                telemetry.interval_ms = ms;
            }
            let settings = PollerSettings::from(&telemetry);
            let period = settings.interval;
            let poller = Arc::new(TelemetryPoller::new(backend, settings));
            if !json {
                print_banner();
            }
            run_watch(&poller, period, polls, json).await?;
        }
        Some(Commands::Check { json }) => {
            let orchestrator = ComplianceOrchestrator::new(
                backend.clone(),
                backend,
                config.compliance.snapshot_index,
            );
            run_check(&orchestrator, json).await?;
        }
        Some(Commands::Chat { query: Some(query) }) => {
            let manager = ConversationManager::from_config(backend, &config.chat);
            run_chat_once(&manager, &query).await?;
        }
        Some(Commands::Chat { query: None }) => {
            let manager = ConversationManager::from_config(backend, &config.chat);
            print_banner();
            run_chat(&manager).await?;
        }
        Some(Commands::Health) => {
            run_health(&*backend, backend.base_url()).await?;
        }
        Some(Commands::Documents { json }) => {
            run_documents(&*backend, json).await?;
        }
        None => {
            let poller = Arc::new(TelemetryPoller::new(
                backend,
                PollerSettings::from(&config.telemetry),
            ));
            print_banner();
            run_watch(&poller, config.telemetry.interval(), None, false).await?;
        }
    }

    Ok(())
}
