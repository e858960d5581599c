use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{issue_token, revoke_token, verify_password};
use crate::error::{AppError, Result};
use crate::repo::identity;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub auth_token: String,
}

/// Exchange email + password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = identity::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(
        &payload.password,
        &state.config.app_secret_key,
        &user.password_hash,
    ) {
        tracing::warn!("Failed login attempt for {}", payload.email);
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(&state.pool, user.id, &state.config.app_secret_key).await?;

    tracing::info!("User {} logged in", user.id);

    Ok(Json(LoginResponse { auth_token: token }))
}

/// Revoke the token presented in the Authorization header
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    revoke_token(&state.pool, token).await?;

    Ok(StatusCode::NO_CONTENT)
}
