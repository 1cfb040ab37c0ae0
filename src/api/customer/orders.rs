use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::error::StoreError;
use crate::middleware::auth::Claims;
use crate::repos;

//ROUTERS
pub fn orders_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/orders", get(get_orders))
        .route("/orders/:id", get(get_order))
        .layer(Extension(db))
}

//ROUTES
async fn get_orders(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    match repos::order::list_for_customer(&*db, claims.customer_id).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn get_order(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    match repos::order::with_details(&*db, id).await {
        // Another customer's order is indistinguishable from a missing one.
        Ok(order) if order.order.customer_id != claims.customer_id => {
            StoreError::NotFound(format!("Order {id}")).into_response()
        }
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(err) => err.into_response(),
    }
}
