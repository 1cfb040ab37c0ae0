use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::product;
use crate::repos;
use crate::repos::product::ProductFilter;

//ROUTERS
pub fn product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/product", get(get_products))
        .route("/product/:id", get(get_product))
        .layer(Extension(db))
}

//ROUTES
async fn get_products(
    Query(params): Query<GetProductsQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    let filter = ProductFilter {
        featured: params.featured,
        min_price: params.min,
        max_price: params.max,
    };

    match repos::product::list(&*db, filter).await {
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

async fn get_product(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::product::find_by_id(&*db, id).await {
        Ok(product) => (StatusCode::OK, Json(PublicProductResponse::new(product))).into_response(),
        Err(err) => err.into_response(),
    }
}

//Structs
#[derive(Deserialize)]
struct GetProductsQuery {
    featured: Option<bool>,
    min: Option<f32>,
    max: Option<f32>,
}

#[derive(Serialize)]
pub struct PublicProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub unit_price: f32,
    pub is_featured: bool,
    pub category_id: i32,
}

impl PublicProductResponse {
    pub fn new(value: product::Model) -> PublicProductResponse {
        PublicProductResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            unit_price: value.unit_price,
            is_featured: value.is_featured,
            category_id: value.category_id,
        }
    }
}
