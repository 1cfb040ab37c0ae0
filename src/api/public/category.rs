use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;

use crate::api::public::product::PublicProductResponse;
use crate::entities::category;
use crate::repos;

//ROUTERS
pub fn category_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/category", get(get_categories))
        .route("/category/:id", get(get_category))
        .route("/category/:id/products", get(get_category_products))
        .layer(Extension(db))
}

//ROUTES
async fn get_categories(Extension(db): Extension<Arc<DatabaseConnection>>) -> impl IntoResponse {
    match repos::category::list(&*db).await {
        Ok(categories) => {
            let response: Vec<PublicCategoryResponse> = categories
                .into_iter()
                .map(PublicCategoryResponse::new)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn get_category(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::category::find_by_id(&*db, id).await {
        Ok(category) => {
            (StatusCode::OK, Json(PublicCategoryResponse::new(category))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

async fn get_category_products(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::product::list_by_category(&*db, id).await {
        Ok(products) => {
            let response: Vec<PublicProductResponse> = products
                .into_iter()
                .map(PublicProductResponse::new)
                .collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

//Structs
#[derive(Serialize)]
struct PublicCategoryResponse {
    id: i32,
    name: String,
    description: String,
}

impl PublicCategoryResponse {
    fn new(value: category::Model) -> PublicCategoryResponse {
        PublicCategoryResponse {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}
