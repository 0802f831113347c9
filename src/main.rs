//! CORS proxy for local front-end development.
//!
//! ```text
//!   Browser ──▶ :3000 ──┬── OPTIONS *        → 200 + CORS headers
//!                       ├── GET/HEAD *       → static files (cwd)
//!                       └── POST /proxy/<p>  → https://app.salesys.se/<p>
//! ```

use clap::Parser;
use std::path::PathBuf;

use salesys_devtools::config::{load_or_default, ProxyConfig, Validate};
use salesys_devtools::lifecycle::{wait_for_interrupt, Shutdown};
use salesys_devtools::net;
use salesys_devtools::observability::logging;
use salesys_devtools::HttpServer;

#[derive(Parser)]
#[command(name = "cors-proxy")]
#[command(about = "CORS proxy and static file server for local development", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Upstream origin (overrides config)
    #[arg(short, long)]
    upstream: Option<String>,

    /// Static file root (overrides config)
    #[arg(short, long)]
    root: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<ProxyConfig, Box<dyn std::error::Error>> {
        let mut config: ProxyConfig = load_or_default(self.config.as_deref())?;
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(upstream) = self.upstream {
            config.upstream.origin = upstream;
        }
        if let Some(root) = self.root {
            config.static_files.root = root;
        }
        config
            .validate()
            .map_err(salesys_devtools::config::ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(logging::DEFAULT_FILTER, logging::LogTarget::Stderr);

    let config = Cli::parse().into_config()?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.origin,
        timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    let listener = net::bind(&config.listener).await?;
    let local_addr = listener.local_addr()?;
    let server = HttpServer::new(config)?;

    tracing::info!("Open http://localhost:{}/index.html in your browser", local_addr.port());

    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_interrupt().await;
    shutdown.trigger();
    handle.await??;

    tracing::info!("Server stopped");
    Ok(())
}
