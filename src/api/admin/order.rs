use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::repos;
use crate::repos::order::OrderChanges;

//ROUTERS
pub fn admin_order_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/order", get(get_orders))
        .route(
            "/order/:id",
            get(admin_get_order).patch(patch_order).delete(delete_order),
        )
        .layer(Extension(db))
}

//ROUTES
async fn get_orders(Extension(db): Extension<Arc<DatabaseConnection>>) -> impl IntoResponse {
    match repos::order::list(&*db).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn admin_get_order(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::order::with_details(&*db, id).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn patch_order(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchOrder>,
) -> impl IntoResponse {
    let changes = OrderChanges {
        order_date: payload.order_date,
        ship_date: payload.ship_date,
        row_version: payload.row_version,
    };

    match repos::order::update(&db, id, changes).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_order(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::order::delete(&db, id).await {
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
#[derive(Deserialize)]
struct PatchOrder {
    order_date: Option<NaiveDate>,
    ship_date: Option<NaiveDate>,
    row_version: Option<i32>,
}
