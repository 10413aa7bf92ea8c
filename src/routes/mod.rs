//! Rutas HTTP
//!
//! Cada recurso monta su propio router bajo `/api/<recurso>`.

pub mod control_routes;
pub mod driver_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api/driver", driver_routes::create_driver_router())
        .nest("/api/vehicle", vehicle_routes::create_vehicle_router())
        .nest("/api/control", control_routes::create_control_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Endpoint de salud simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-control",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
