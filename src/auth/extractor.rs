use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::models::User;
use crate::AppState;

use super::tokens::user_for_token;

/// Extractor that validates the Authorization header and provides the
/// authenticated user. Use in any handler that requires authentication.
pub struct AuthUser(pub User);

/// Extractor for routes readable by anonymous viewers.
///
/// No Authorization header resolves to `None`; a header that is present but
/// invalid is rejected rather than silently downgraded to anonymous.
pub struct MaybeAuthUser(pub Option<User>);

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header_value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let header_str = header_value.to_str().map_err(|_| AppError::Unauthorized)?;
    let token = header_str
        .strip_prefix("Bearer ")
        .ok_or(AppError::Unauthorized)?;

    Ok(Some(token))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts)?.ok_or(AppError::Unauthorized)?;

        let user = user_for_token(&state.pool, token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let Some(token) = bearer_token(parts)? else {
            return Ok(MaybeAuthUser(None));
        };

        let user = user_for_token(&state.pool, token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(MaybeAuthUser(Some(user)))
    }
}
