//! Rutas HTTP
//! 
//! Cada módulo expone un `create_*_router()` que se monta aquí.

pub mod account_routes;
pub mod auth_routes;
pub mod availability_routes;
pub mod car_routes;
pub mod history_routes;
pub mod report_routes;
pub mod request_routes;
pub mod user_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/account", account_routes::create_account_router())
        .nest("/user", user_routes::create_user_router())
        .nest("/car", car_routes::create_car_router())
        .nest("/history", history_routes::create_history_router())
        .nest("/car-usage", report_routes::create_report_router())
        .merge(availability_routes::create_availability_router())
        .merge(request_routes::create_request_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
