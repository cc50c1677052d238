//! Dataroom server — data room file service.
//!
//! Main entry point that wires configuration, database, object storage,
//! and the HTTP API together.

use tracing_subscriber::{EnvFilter, fmt};

use dataroom_core::config::AppConfig;
use dataroom_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration for the current environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("DATAROOM_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Dataroom v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = dataroom_database::connection::create_pool(&config.database).await?;
    dataroom_database::migration::run_migrations(&db_pool).await?;

    let store = dataroom_storage::from_config(&config.storage).await?;
    tracing::info!(provider = store.provider_type(), "Object store ready");

    let state = dataroom_api::build_state(config, db_pool, store);
    dataroom_api::serve(state).await
}
