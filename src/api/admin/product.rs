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
use crate::repos::product::{NewProduct, ProductChanges};

//ROUTERS
pub fn admin_product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/product", post(create_product))
        .route(
            "/product/:id",
            get(admin_get_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .layer(Extension(db))
}

//ROUTES
async fn create_product(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateProduct>,
) -> impl IntoResponse {
    let new = NewProduct {
        name: payload.name,
        description: payload.description,
        unit_price: payload.unit_price,
        is_featured: payload.is_featured.unwrap_or(false),
        category_id: payload.category_id,
    };

    match repos::product::add(&db, new).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn admin_get_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::product::find_by_id(&*db, id).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn patch_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchProduct>,
) -> impl IntoResponse {
    let changes = ProductChanges {
        name: payload.name,
        description: payload.description,
        unit_price: payload.unit_price,
        is_featured: payload.is_featured,
        category_id: payload.category_id,
        row_version: payload.row_version,
    };

    match repos::product::update(&db, id, changes).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::product::delete(&db, id).await {
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
struct CreateProduct {
    name: String,
    description: String,
    unit_price: f32,
    is_featured: Option<bool>,
    category_id: i32,
}

#[derive(Deserialize)]
struct PatchProduct {
    name: Option<String>,
    description: Option<String>,
    unit_price: Option<f32>,
    is_featured: Option<bool>,
    category_id: Option<i32>,
    row_version: Option<i32>,
}
