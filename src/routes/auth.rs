//! Authentication routes: login and logout.

use axum::{extract::State, Json};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use chrono::Utc;
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::services::auth as auth_service;
use crate::services::auth::TokenResponse;
use crate::services::revocation;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let tokens = auth_service::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        state.config.jwt_token_expiry_secs,
    )
    .await?;

    Ok(ApiResponse::success(tokens))
}

/// POST /auth/logout — revoke the presented token for its remaining lifetime.
pub async fn logout(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    TypedHeader(Authorization(bearer)): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<ApiResponse<&'static str>>, AppError> {
    let token = bearer.token();
    // CurrentUser already authenticated the request, so the claims decode.
    let claims = auth_service::validate_token(token, &state.config.jwt_secret)?;
    let ttl = claims.exp - Utc::now().timestamp();

    revocation::revoke(&state.redis, token, ttl).await?;
    Ok(ApiResponse::success("Logged out successfully"))
}
