use crate::entities::customer::{self, Entity as CustomerEntity, Role};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};
use thiserror::Error;

/// Bearer-token guard. Rejects the request unless the token is valid and the
/// customer it names still exists with the required role.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok());

    let token = match auth_header.and_then(|header| header.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return Err(StatusCode::UNAUTHORIZED),
    };

    let claims = match validate_token(state.db, token, state.role).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!("rejected token: {err}");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub customer_id: i32,
    pub role: String,
    pub exp: usize,
}

#[derive(Clone, Debug)]
pub struct AuthState {
    pub db: Arc<DatabaseConnection>,
    pub role: Role,
}

pub fn generate_token(customer_id: i32, role: String) -> Result<String, AuthError> {
    let exp = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or(AuthError::GenerationFail)?
        .timestamp() as usize;

    let claims = Claims {
        customer_id,
        role,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_secret_key()?.as_bytes()),
    )
    .map_err(|_| AuthError::GenerationFail)
}

pub async fn validate_token(
    db: Arc<DatabaseConnection>,
    token: &str,
    required_role: Role,
) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_secret_key()?.as_bytes()),
        &validation,
    )
    .map_err(|_| AuthError::TokenExpired)?;

    let claims = token_data.claims;
    let role = Role::from_str(&claims.role).map_err(|_| AuthError::InvalidCustomerOrRole)?;
    if role != required_role {
        return Err(AuthError::InvalidCustomerOrRole);
    }

    match CustomerEntity::find_by_id(claims.customer_id)
        .filter(customer::Column::Role.eq(role))
        .one(&*db)
        .await
    {
        Ok(Some(_)) => Ok(claims),
        Ok(None) => Err(AuthError::InvalidCustomerOrRole),
        Err(_) => Err(AuthError::InternalServerError),
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid customer id or role")]
    InvalidCustomerOrRole,
    #[error("Token expired")]
    TokenExpired,
    #[error("Failed to generate token")]
    GenerationFail,
    #[error("SECRET is not configured")]
    MissingSecret,
    #[error("Internal server error")]
    InternalServerError,
}

fn get_secret_key() -> Result<String, AuthError> {
    dotenvy::dotenv().ok();
    std::env::var("SECRET").map_err(|_| AuthError::MissingSecret)
}
