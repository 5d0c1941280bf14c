//! mviz-web - Visualization page server
//!
//! Serves the static visualization pages, the static data directory,
//! and the `/api/views/*` endpoints carrying chart-ready JSON. The
//! dataset loads once at startup and stays immutable for the life of
//! the process.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use mviz_common::config;
use mviz_common::loader::DataSet;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mviz_web::{build_router, AppState};

/// Command-line arguments for mviz-web
#[derive(Parser, Debug)]
#[command(name = "mviz-web")]
#[command(about = "Visualization page server for the music dataset")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "MVIZ_WEB_PORT")]
    port: Option<u16>,

    /// Static data directory holding the JSON sources
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Static assets directory holding page markup and chart scripts
    #[arg(short, long)]
    assets_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mviz_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let toml_config = config::TomlConfig::load();
    let port = config::resolve_port(args.port, toml_config.web_port, config::DEFAULT_WEB_PORT);
    let data_dir = config::resolve_data_dir(args.data_dir, &toml_config);
    let assets_dir = config::resolve_assets_dir(args.assets_dir, &toml_config);

    info!("Starting mviz-web on port {}", port);
    info!("Data directory: {}", data_dir.display());
    info!("Assets directory: {}", assets_dir.display());

    let dataset = Arc::new(DataSet::load(&data_dir).await);

    let state = AppState {
        dataset,
        assets_dir,
        data_dir,
        port,
    };
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
