//! mviz-proxy - Upstream API relay
//!
//! Small server variant exposing `GET /api/data`, which proxies a
//! third-party API response verbatim as JSON for the map pages.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use mviz_common::config;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mviz_proxy::{build_router, AppState};

/// Command-line arguments for mviz-proxy
#[derive(Parser, Debug)]
#[command(name = "mviz-proxy")]
#[command(about = "Upstream API relay for the music dataset pages")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "MVIZ_PROXY_PORT")]
    port: Option<u16>,

    /// Upstream URL to relay
    #[arg(short, long)]
    upstream_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mviz_proxy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let toml_config = config::TomlConfig::load();
    let port = config::resolve_port(args.port, toml_config.proxy_port, config::DEFAULT_PROXY_PORT);
    let upstream_url = config::resolve_upstream_url(args.upstream_url, &toml_config);

    info!("Starting mviz-proxy on port {}", port);
    info!("Upstream URL: {}", upstream_url);

    let state = AppState::new(upstream_url, port)
        .context("Failed to build upstream HTTP client")?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
