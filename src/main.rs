//! DR failover controller.
//!
//! # Architecture Overview
//!
//! ```text
//!   check / watch                         action / serve (admin API)
//!        │                                        │
//!        ▼                                        ▼
//! ┌──────────────────────┐              ┌──────────────────────┐
//! │ FailoverOrchestrator │              │ FailbackOrchestrator │
//! │ probe → confirm →    │              │ failover | failback  │
//! │ scale → wait →       │              │ | status             │
//! │ cutover → notify     │              └──────────┬───────────┘
//! └──┬──────┬──────┬─────┘                         │
//!    │      │      │                               │
//!    ▼      ▼      ▼                               ▼
//!  probe capacity  dns ◀───────────────────── capacity, dns
//!           │            notify
//!           ▼
//!   Auto Scaling / Route 53 / SNS / chat webhook
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use dr_failover::admin::{self, AdminState};
use dr_failover::config::{self, ControllerConfig, FailbackSettings, FailoverSettings};
use dr_failover::lifecycle::{startup, Shutdown};
use dr_failover::observability::{logging, metrics};
use dr_failover::orchestrator::FailoverScheduler;

#[derive(Parser)]
#[command(name = "dr-failover")]
#[command(about = "Disaster-recovery failover and failback controller", long_about = None)]
struct Cli {
    /// TOML file with tunables (timeouts, TTLs, admin API, logging).
    #[arg(short, long, env = "DR_FAILOVER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one failover check and exit
    Check,
    /// Run failover checks periodically until interrupted
    Watch,
    /// Run one operator action: failover, failback or status
    Action {
        draction: String,
    },
    /// Serve the admin API for operator actions
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = config::load_or_default(cli.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "dr-failover starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    match cli.command {
        Commands::Check => run_check(&config).await?,
        Commands::Watch => run_watch(&config).await?,
        Commands::Action { draction } => {
            let settings = FailbackSettings::from_env()?;
            let orchestrator = startup::build_failback(&settings, &config).await;

            let response = orchestrator.execute(&draction).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            if !response.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Serve => run_admin(&config).await?,
    }

    Ok(())
}

async fn run_check(config: &ControllerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let settings = FailoverSettings::from_env()?;
    let orchestrator = startup::build_failover(&settings, config).await?;

    let event = orchestrator.run().await;
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

async fn run_watch(config: &ControllerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let settings = FailoverSettings::from_env()?;
    let orchestrator = Arc::new(startup::build_failover(&settings, config).await?);

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let scheduler = FailoverScheduler::new(
        orchestrator,
        Duration::from_secs(config.scheduler.interval_secs),
    );
    let completed = scheduler.run(shutdown.subscribe()).await;

    tracing::info!(completed, "Shutdown complete");
    Ok(())
}

async fn run_admin(config: &ControllerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let settings = FailbackSettings::from_env()?;
    let orchestrator = Arc::new(startup::build_failback(&settings, config).await);

    if config.admin.uses_placeholder_key() {
        tracing::warn!("admin.api_key is the default placeholder; set a real key before exposing the admin API");
    }

    let state = AdminState::new(orchestrator, &config.admin.api_key);
    let router = admin::setup_admin_router(
        state,
        Duration::from_secs(config.admin.request_timeout_secs),
    );

    let listener = TcpListener::bind(&config.admin.bind_address).await?;
    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    admin::serve(listener, router, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
