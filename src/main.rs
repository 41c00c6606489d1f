//! Native story web frontend (v1)
//!
//! Server-rendered story pages backed by a GraphQL content API.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                 NATIVEX WEB                   │
//!     Client Request     │  ┌─────────┐    ┌──────────┐    ┌──────────┐  │
//!     ───────────────────┼─▶│  http   │───▶│  story   │───▶│ content  │──┼──▶ GraphQL API
//!                        │  │ server  │    │ handler  │    │ fetcher  │  │
//!                        │  └────┬────┘    └────┬─────┘    └──────────┘  │
//!                        │       │              │                        │
//!                        │       │              ▼                        │
//!                        │       │     ┌─────────────────┐               │
//!                        │       │     │ seo: redirect + │               │
//!                        │       │     │    metadata     │               │
//!                        │       │     └────────┬────────┘               │
//!                        │       ▼              ▼                        │
//!     Client Response    │  ┌─────────┐    ┌──────────┐                  │
//!     ◀──────────────────┼──│ assets  │    │templates │                  │
//!                        │  │favicon/ │    │ + data   │                  │
//!                        │  │ robots  │    │  layer   │                  │
//!                        │  └─────────┘    └──────────┘                  │
//!                        │                                               │
//!                        │  config · observability · lifecycle           │
//!                        └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use nativex_web::config::load_config;
use nativex_web::content::GraphQlFetcher;
use nativex_web::lifecycle::signals;
use nativex_web::observability::{logging, metrics};
use nativex_web::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "nativex-web")]
#[command(about = "Server-rendered native story pages", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "NATIVEX_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    logging::init(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "nativex-web starting");

    tracing::info!(
        environment = %config.environment,
        bind_address = %config.listener.bind_address,
        graphql_uri = %config.graphql.uri,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validated at load time
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let fetcher = Arc::new(GraphQlFetcher::new(&config.graphql)?);
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, fetcher)?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
