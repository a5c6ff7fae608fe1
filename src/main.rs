//! Demo Service
//!
//! A small web service used to exercise deployment platforms.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────┐
//!                   │                   DEMO SERVICE                    │
//!                   │                                                   │
//!   Client Request  │  ┌──────────┐   ┌───────────┐   ┌─────────────┐  │
//!   ────────────────┼─▶│   http   │──▶│ envelope  │──▶│    demo     │  │
//!                   │  │  server  │   │ validate  │   │ delay + cpu │  │
//!                   │  └──────────┘   └───────────┘   └─────────────┘  │
//!                   │        │                                          │
//!                   │        ▼                                          │
//!                   │  ┌──────────┐                                     │
//!                   │  │ outbound │─────────────────────────────────────┼──▶ Internal
//!                   │  │  relay   │                                     │    Service
//!                   │  └──────────┘                                     │
//!                   │                                                   │
//!                   │  config · observability · lifecycle               │
//!                   └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use demo_service::config::loader::load_config;
use demo_service::config::validation::validate_config;
use demo_service::config::loader::ConfigError;
use demo_service::http::HttpServer;
use demo_service::lifecycle::{signals, Shutdown};
use demo_service::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "demo-service")]
#[command(about = "Demonstration service simulating latency, CPU load and an outbound relay", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment name reported by /demo (overrides config and DEMO_ENV).
    #[arg(short, long)]
    env: Option<String>,

    /// Listen address (overrides config and DEMO_BIND_ADDRESS).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(env) = cli.env {
        config.service.env = env;
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init_logging(&config.observability);

    tracing::info!("demo-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        env = %config.service.env,
        request_timeout_secs = ?config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Arc::new(Shutdown::new());
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, shutdown)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
