use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::entities::customer::Role;
use crate::error::StoreError;
use crate::middleware::auth::generate_token;
use crate::repos;

static PASSWORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 !@#$%^&*()_+=\-]{8,64}$").expect("pattern compiles"));

//ROUTERS
pub fn auth_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/register", post(register_customer))
        .route("/login", post(login))
        .layer(Extension(db))
}

//ROUTES
async fn register_customer(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<RegisterCustomer>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return StoreError::Validation(errors.to_string()).into_response();
    }

    match repos::customer::add(
        &db,
        payload.full_name,
        payload.email,
        payload.password,
        Role::Customer,
    )
    .await
    {
        Ok(_) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Customer registered successfully"
            })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CustomerLogin>,
) -> impl IntoResponse {
    let found = match repos::customer::find_by_email(&*db, &payload.email).await {
        Ok(found) => found,
        Err(err) => return err.into_response(),
    };

    match found {
        Some(model) => match model.check_hash(&payload.password) {
            Ok(()) => match generate_token(model.id, model.role.to_string()) {
                Ok(token) => (
                    StatusCode::OK,
                    Json(json!({
                        "token": token
                    })),
                )
                    .into_response(),
                Err(err) => {
                    StoreError::Internal(format!("failed to generate token: {err}")).into_response()
                }
            },
            Err(_) => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Invalid email or password"
                })),
            )
                .into_response(),
        },
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid email or password"
            })),
        )
            .into_response(),
    }
}

//Structs
#[derive(Deserialize, Clone, Debug, Validate)]
struct RegisterCustomer {
    #[validate(length(min = 1, max = 50))]
    full_name: String,
    #[validate(email, length(max = 50))]
    email: String,
    #[validate(regex(
        path = *PASSWORD_PATTERN,
        message = "password must be 8-64 letters, digits or punctuation"
    ))]
    password: String,
}

#[derive(Deserialize, Clone, Debug)]
struct CustomerLogin {
    email: String,
    password: String,
}
