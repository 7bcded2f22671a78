//! eco-coach - Waste Reduction Coach service
//!
//! Records discarded items, classifies each one (remote advisor with a
//! keyword fallback), estimates CO2 saved, and serves history and dashboard
//! aggregates over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use eco_common::config::{default_config_path, load_toml_config, resolve_root_folder};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eco_coach::config::AdvisorConfig;
use eco_coach::services::{AnalysisService, RemoteAdvisorClient};
use eco_coach::AppState;

const DEFAULT_PORT: u16 = 5080;
const DATABASE_FILE: &str = "eco-coach.db";

/// Command-line arguments for eco-coach
#[derive(Parser, Debug)]
#[command(name = "eco-coach")]
#[command(about = "Waste reduction coach service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides TOML)
    #[arg(short, long, env = "ECO_COACH_PORT")]
    port: Option<u16>,

    /// SQLite database file (overrides TOML)
    #[arg(short, long, env = "ECO_COACH_DATABASE")]
    database: Option<PathBuf>,

    /// Data folder holding the database when no database path is given
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// TOML bootstrap config file
    #[arg(short, long, env = "ECO_COACH_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let toml_config = load_toml_config(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    // Initialize tracing (RUST_LOG wins over TOML level)
    let default_filter = format!(
        "eco_coach={level},eco_common={level},tower_http={level}",
        level = toml_config.logging.level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting eco-coach (Waste Reduction Coach)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Config: {}", config_path.display());

    let db_path = match args.database.or_else(|| toml_config.database_path.clone()) {
        Some(path) => path,
        None => resolve_root_folder(args.root_folder.as_deref(), "ECO_COACH_ROOT_FOLDER", &toml_config)
            .join(DATABASE_FILE),
    };
    info!("Database: {}", db_path.display());

    let db_pool = eco_coach::db::init_database_pool(&db_path)
        .await
        .context("Failed to initialize database")?;
    info!("Database connection established");

    let advisor_config = AdvisorConfig::resolve(&toml_config.advisor);
    info!(
        endpoint = %advisor_config.endpoint,
        model = %advisor_config.model,
        configured = advisor_config.api_key.is_some(),
        "Waste advisor configured"
    );
    let advisor = RemoteAdvisorClient::new(advisor_config)
        .context("Failed to build advisor HTTP client")?;
    let analysis = AnalysisService::new(Arc::new(advisor));

    let state = AppState::new(db_pool, analysis);
    let app = eco_coach::build_router(state);

    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
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
