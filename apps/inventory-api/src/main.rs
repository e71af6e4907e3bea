use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let db = match config.database.clone() {
        Some(database) => {
            info!("Connecting to PostgreSQL");
            let db = database::postgres::connect_from_config_with_retry(
                database,
                Some(config.db_retry.clone()),
            )
            .await
            .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            if config.run_migrations {
                database::postgres::run_migrations::<Migrator>(&db, config.app.name)
                    .await
                    .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
            }

            Some(db)
        }
        None => None,
    };

    let state = AppState { config, db };
    let app = build_app(&state)?;

    info!("Starting inventory API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Some(db) = state.db {
                info!("Shutting down: closing database connections");
                match db.close().await {
                    Ok(_) => info!("PostgreSQL connection closed successfully"),
                    Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
                }
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Inventory API shutdown complete");
    Ok(())
}

/// Full application router: API routes, docs, middleware and probes
///
/// - /health: liveness check with app name/version
/// - /ready: readiness check against the database
fn build_app(state: &AppState) -> eyre::Result<Router> {
    let api_routes = api::routes(state);
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone())))
}
