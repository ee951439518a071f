//! Rutas HTTP
//!
//! Ensambla el router completo del servicio.

pub mod fleet_routes;
pub mod report_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use crate::state::AppState;

/// Crear el router principal con todas las rutas y middleware
pub fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        if state.config.is_production() {
            tracing::warn!("⚠️ CORS_ORIGINS vacío en producción: se aceptan todos los orígenes");
        }
        cors_middleware()
    } else {
        cors_middleware_with_origins(state.config.cors_origins.clone())
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/reports", report_routes::create_report_router())
        .nest("/api", fleet_routes::create_fleet_router())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Endpoint de salud simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-reporting",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
