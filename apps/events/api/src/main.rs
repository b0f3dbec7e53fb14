use axum_helpers::server::{health_router, serve};
use core_config::tracing::{init_tracing, install_color_eyre};
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
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from .env and environment variables
    let config = Config::load()?;

    // Initialize tracing
    init_tracing(&config.environment);

    // Fail fast: the connector pings the server before returning
    let mongo_client = database::mongodb::connect_from_config(&config.mongodb)
        .await
        .map_err(|e| eyre::eyre!("MongoDB connection failed: {}", e))?;

    let db = mongo_client.database(config.mongodb.database());

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // Merge health endpoint
    let app = router.merge(health_router(state.config.app));

    // The client moves into the cleanup future
    let AppState {
        config,
        mongo_client,
        ..
    } = state;

    info!("Starting Events API with graceful shutdown (30s timeout)");

    serve(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Events API shutdown complete");
    Ok(())
}
