//! Attune API Server
//!
//! Run with: cargo run --bin attune-api
//!
//! Configuration comes from a TOML file (see `--print-default-config`) with
//! environment variable overrides (`ATTUNE_*`); command-line flags win over
//! both.

use attune::api::{serve, ApiConfig, AppState};
use attune::config::{generate_default_config, Config};
use attune::estimator::{
    KeywordEstimator, RemoteEstimator, RemoteEstimatorConfig, TextEstimator,
};
use attune::events::store::InMemoryEventStore;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "attune-api", version, about = "Attune wellness logging API server")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Print the default config file and exit
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        println!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    init_tracing(&config);

    tracing::info!("Starting Attune API server v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(InMemoryEventStore::new());

    let estimator: Arc<dyn TextEstimator> = match config.estimator.backend.as_str() {
        "remote" => {
            tracing::info!("Using remote estimation backend: {}", config.estimator.url);
            let remote = RemoteEstimator::new(RemoteEstimatorConfig {
                base_url: config.estimator.url.clone(),
                request_timeout_ms: config.estimator.request_timeout_ms,
            });
            match remote.health_check().await {
                Ok(_) => tracing::info!("Estimation service connection verified"),
                Err(e) => tracing::warn!(
                    "Estimation service not available: {} (requests will fail until it is)",
                    e
                ),
            }
            Arc::new(remote)
        }
        _ => {
            tracing::info!("Using built-in keyword estimation backend");
            Arc::new(KeywordEstimator::new())
        }
    };

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        request_timeout_ms: config.api.request_timeout_secs * 1000,
        ..Default::default()
    };

    let state = AppState::with_thresholds(
        store,
        estimator,
        api_config.clone(),
        config.thresholds.clone(),
        config.snapshot.clone(),
    );

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Attune API server stopped");
    Ok(())
}

/// Initialize tracing from the logging config
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "attune={},tower_http=info",
            config.logging.level
        ))
    });

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
