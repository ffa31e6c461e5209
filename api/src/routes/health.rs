//! Health check endpoint

use std::time::Instant;

use actix_web::{web, HttpResponse};
use ck_shared::types::{HealthResponse, ServiceHealth};

use crate::app::AppState;

/// `GET /health`
///
/// Reports the database only when one is configured.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let mut health = HealthResponse::new(env!("CARGO_PKG_VERSION"));

    if let Some(database) = &state.database {
        let started = Instant::now();
        let check = match database.health_check().await {
            Ok(()) => ServiceHealth::healthy(started.elapsed().as_millis() as u64),
            Err(e) => ServiceHealth::unhealthy(e.to_string()),
        };
        health = health.with_service("database", check);
    }

    HttpResponse::Ok().json(health)
}
