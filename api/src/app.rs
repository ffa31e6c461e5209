//! Application state and factory
//!
//! This module holds the shared state and builds the Actix-web application
//! so that `main` and the integration tests wire routes identically.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use chrono::Duration;
use tracing_actix_web::TracingLogger;

use ck_core::services::token::{TokenService, TokenServiceConfig};
use ck_infra::database::DatabasePool;
use ck_shared::config::TokenConfig;
use ck_shared::errors::error_codes;

use crate::handlers::ApiError;
use crate::routes;

/// State shared by all workers
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub database: Option<DatabasePool>,
}

impl AppState {
    pub fn new(token_service: Arc<TokenService>, database: Option<DatabasePool>) -> Self {
        Self {
            token_service,
            database,
        }
    }
}

/// Token service settings from the `[token]` configuration section
pub fn token_service_config(config: &TokenConfig) -> TokenServiceConfig {
    TokenServiceConfig::default()
        .with_issuer(config.issuer.clone())
        .with_audience(config.audience.clone())
        .with_access_token_ttl(Duration::seconds(config.access_token_ttl_secs))
        .with_refresh_token_ttl(Duration::seconds(config.refresh_token_ttl_secs))
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let token_service = Arc::clone(&app_state.token_service);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest {
            code: error_codes::BAD_REQUEST,
            message: err.to_string(),
        }
        .into()
    });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api/v1")
                .configure(|cfg| routes::tokens::configure(cfg, token_service)),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ck_shared::errors::ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
