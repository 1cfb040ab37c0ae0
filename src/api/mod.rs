pub mod admin;
pub mod auth;
pub mod customer;
pub mod public;

use axum::{http::StatusCode, middleware::from_fn, response::IntoResponse, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::middleware::logging::logging_middleware;

use admin::admin_api_router;
use auth::auth_router;
use customer::customer_api_router;
use public::public_api_router;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .nest("/api", auth_router(shared_db.clone()))
        .nest("/api", public_api_router(shared_db.clone()))
        .nest("/api", customer_api_router(shared_db.clone()))
        .nest("/api/admin", admin_api_router(shared_db))
        .fallback(not_found)
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "No such route"
        })),
    )
}
