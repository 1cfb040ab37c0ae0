use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::repos;
use crate::repos::category::CategoryChanges;

//ROUTERS
pub fn admin_category_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/category", post(create_category))
        .route(
            "/category/:id",
            get(admin_get_category)
                .patch(patch_category)
                .delete(delete_category),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_category(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateCategory>,
) -> impl IntoResponse {
    match repos::category::add(&db, payload.name, payload.description).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Admin reads return the full row, concurrency token included.
async fn admin_get_category(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::category::find_by_id(&*db, id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn patch_category(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchCategory>,
) -> impl IntoResponse {
    let changes = CategoryChanges {
        name: payload.name,
        description: payload.description,
        row_version: payload.row_version,
    };

    match repos::category::update(&db, id, changes).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_category(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::category::delete(&db, id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "message": "Resource deleted successfully"
            })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

//Structs
#[derive(Deserialize, Clone, Debug)]
struct CreateCategory {
    name: String,
    description: String,
}

#[derive(Deserialize)]
struct PatchCategory {
    name: Option<String>,
    description: Option<String>,
    row_version: Option<i32>,
}
