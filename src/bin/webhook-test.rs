//! Webhook test server and call simulator.
//!
//! `webhook-test` listens on :8080 for inbound-call webhooks and forwards a
//! copy of each to :3000. `webhook-test simulate` sends sample events instead.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use salesys_devtools::config::{load_or_default, ConfigError, Validate, WebhookConfig};
use salesys_devtools::lifecycle::{wait_for_interrupt, Shutdown};
use salesys_devtools::net;
use salesys_devtools::observability::logging;
use salesys_devtools::{Simulator, WebhookServer};

#[derive(Parser)]
#[command(name = "webhook-test")]
#[command(about = "Inbound-call webhook test server and simulator", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Do not forward received webhooks
    #[arg(long)]
    no_forward: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send sample inbound-call webhooks to the configured targets
    Simulate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(logging::DEFAULT_FILTER, logging::LogTarget::Stdout);

    let cli = Cli::parse();
    let mut config: WebhookConfig = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.listener.bind_address = bind;
    }
    if cli.no_forward {
        config.server.forward.enabled = false;
    }
    config.validate().map_err(ConfigError::Validation)?;

    match cli.command {
        Some(Commands::Simulate) => simulate(config).await,
        None => serve(config).await,
    }
}

async fn simulate(config: WebhookConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("SIMULATING WEBHOOK CALLS");
    println!("{}", "=".repeat(40));

    let report = Simulator::new(config.simulator)?.run().await;

    tracing::info!(
        delivered = report.delivered(),
        required_failures = report.required_failures(),
        "Simulation finished"
    );
    Ok(())
}

async fn serve(config: WebhookConfig) -> Result<(), Box<dyn std::error::Error>> {
    let listener = net::bind(&config.server.listener).await?;
    let port = listener.local_addr()?.port();
    let webhook_path = config.server.webhook_path.clone();
    let server = WebhookServer::new(config.server)?;

    tracing::info!("Webhook endpoint: http://localhost:{port}{webhook_path}");
    tracing::info!("Run `webhook-test simulate` to send sample calls. Press Ctrl+C to stop");

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_interrupt().await;
    tracing::info!("Shutting down...");
    shutdown.trigger();
    handle.await??;
    Ok(())
}
