use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the repository layer and mapped to HTTP statuses at
/// the handler boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} was not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("The row was modified by another request")]
    StaleRowVersion,
    #[error("{0}")]
    Internal(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            StoreError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            StoreError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            StoreError::StaleRowVersion => (StatusCode::CONFLICT, self.to_string()),
            StoreError::Internal(message) => {
                tracing::error!("internal error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            StoreError::Db(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({
                "error": message
            })),
        )
            .into_response()
    }
}
