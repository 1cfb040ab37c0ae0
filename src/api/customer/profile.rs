use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::repos;
use crate::repos::customer::CustomerChanges;

//ROUTERS
pub fn profile_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/profile", get(get_profile).patch(patch_profile))
        .layer(Extension(db))
}

//ROUTES
async fn get_profile(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    match repos::customer::find_by_id(&*db, claims.customer_id).await {
        Ok(model) => (
            StatusCode::OK,
            Json(json!({
                "full_name": model.full_name,
                "email": model.email
            })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

async fn patch_profile(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<PatchProfile>,
) -> impl IntoResponse {
    let changes = CustomerChanges {
        full_name: payload.full_name,
        email: payload.email,
        password: payload.password,
        row_version: None,
    };

    match repos::customer::update(&db, claims.customer_id, changes).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "message": "Resource patched successfully"
            })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

//Structs
#[derive(Deserialize)]
struct PatchProfile {
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}
