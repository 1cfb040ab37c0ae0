use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::entities::customer::Role;
use crate::repos;
use crate::repos::customer::CustomerSearch;

//ROUTERS
pub fn admin_customer_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/customer", get(get_customers).post(create_customer))
        .route(
            "/customer/:id",
            get(admin_get_customer).delete(delete_customer),
        )
        .layer(Extension(db))
}

//ROUTES
async fn get_customers(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(query): Query<CustomersQuery>,
) -> impl IntoResponse {
    let search = CustomerSearch {
        query: query.query,
        sort_by: query.sort_by,
        order: query.order,
        role: query.role,
    };

    match repos::customer::search(&*db, search).await {
        Ok(customers) => (StatusCode::OK, Json(customers)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn create_customer(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<AdminCreateCustomer>,
) -> impl IntoResponse {
    match repos::customer::add(
        &db,
        payload.full_name,
        payload.email,
        payload.password,
        payload.role,
    )
    .await
    {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn admin_get_customer(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::customer::find_by_id(&*db, id).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn delete_customer(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> impl IntoResponse {
    match repos::customer::delete(&db, id).await {
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
struct AdminCreateCustomer {
    full_name: String,
    email: String,
    password: String,
    role: Role,
}

#[derive(Deserialize)]
struct CustomersQuery {
    query: Option<String>,
    sort_by: Option<String>,
    order: Option<String>,
    role: Option<Role>,
}
