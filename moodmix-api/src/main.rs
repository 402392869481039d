//! moodmix-api - Main entry point
//!
//! Resolves configuration, opens the (optional) recommendation history store
//! and serves the HTTP API until Ctrl+C / SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use moodmix_api::{build_router, AppState};
use moodmix_common::config::{CliOverrides, ServiceConfig};
use moodmix_common::db::Persistence;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for moodmix-api
///
/// Anything not given here falls back to environment variables, then the
/// TOML config file, then compiled defaults.
#[derive(Parser, Debug)]
#[command(name = "moodmix-api")]
#[command(about = "Mood-based music and radio suggestion service")]
#[command(version)]
struct Args {
    /// Address to bind (env: MOODMIX_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (env: PORT, default 8000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Document store URL, e.g. sqlite://moodmix.db (env: DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// TOML config file (env: MOODMIX_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        CliOverrides {
            host: args.host,
            port: args.port,
            database_url: args.database_url,
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodmix_api=info,moodmix_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting MoodMix API (moodmix-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let cli: CliOverrides = Args::parse().into();
    let config = ServiceConfig::resolve(&cli);
    info!("Configuration: {:?}", config);

    // Store problems are logged inside connect(); the service runs without history
    let persistence = Persistence::connect(&config).await;

    let state = AppState::with_reference_catalog(persistence, config.persist_timeout);
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("moodmix-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

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
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
