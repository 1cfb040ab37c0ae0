pub mod category;
pub mod customer;
pub mod order;
pub mod product;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::customer::Role;
use crate::middleware::auth::{auth_middleware, AuthState};

use category::admin_category_router;
use customer::admin_customer_router;
use order::admin_order_router;
use product::admin_product_router;

pub fn admin_api_router(db: Arc<DatabaseConnection>) -> Router {
    let admin_category_router = admin_category_router(db.clone());
    let admin_product_router = admin_product_router(db.clone());
    let admin_customer_router = admin_customer_router(db.clone());
    let admin_order_router = admin_order_router(db.clone());

    Router::new()
        .nest("/", admin_category_router)
        .nest("/", admin_product_router)
        .nest("/", admin_customer_router)
        .nest("/", admin_order_router)
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                role: Role::Admin,
            },
            auth_middleware,
        ))
}
