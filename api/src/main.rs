use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use ck_api::app::{create_app, token_service_config, AppState};
use ck_core::services::token::{load_or_generate, TokenService};
use ck_infra::database::DatabasePool;
use ck_infra::logging;
use ck_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("CREDKIT_CONFIG").ok().map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("failed to load configuration")?;

    logging::init(&config.logging)?;

    info!(environment = %config.environment, "Starting Credkit API server");

    let key_path = &config.token.private_key_path;
    let keypair = load_or_generate(key_path)
        .with_context(|| format!("failed to load signing key from {}", key_path))?;
    let token_service = Arc::new(TokenService::new(keypair, token_service_config(&config.token)));

    let database = if config.database.is_enabled() {
        let pool = DatabasePool::connect(&config.database).await?;
        info!(pool = %pool.statistics(), "Database connected");
        Some(pool)
    } else {
        info!("No database URL configured, running without database");
        None
    };

    let app_state = web::Data::new(AppState::new(token_service, database));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let state = app_state.clone();
    let mut server = HttpServer::new(move || create_app(state.clone()))
        .shutdown_timeout(config.server.shutdown_timeout_secs);
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    if let Some(database) = &app_state.database {
        database.close().await;
    }

    info!("Server stopped");
    Ok(())
}
