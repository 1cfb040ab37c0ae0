pub mod cart;
pub mod orders;
pub mod profile;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::customer::Role;
use crate::middleware::auth::{auth_middleware, AuthState};

use cart::cart_router;
use orders::orders_router;
use profile::profile_router;

pub fn customer_api_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .nest("/", cart_router(db.clone()))
        .nest("/", orders_router(db.clone()))
        .nest("/", profile_router(db.clone()))
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                role: Role::Customer,
            },
            auth_middleware,
        ))
}
