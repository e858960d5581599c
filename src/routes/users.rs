use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, verify_password, AuthUser, MaybeAuthUser};
use crate::error::{AppError, Result};
use crate::image::{parse_data_uri, ImageStore};
use crate::models::{NewUser, User};
use crate::pagination::{PageParams, PageResponse};
use crate::repo::identity;
use crate::views::{self, UserShortView, UserView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Register a new account
///
/// The email doubles as the login identifier and must be unique. The password
/// is stored as a keyed hash, never in the clear.
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserShortView>)> {
    if !User::validate_email(&payload.email) {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    if !User::validate_username(&payload.username) {
        return Err(AppError::Validation("Invalid username".to_string()));
    }
    if payload.first_name.is_empty() || payload.last_name.is_empty() {
        return Err(AppError::Validation(
            "First and last name are required".to_string(),
        ));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let user = identity::create_user(
        &state.pool,
        NewUser {
            email: payload.email,
            username: payload.username,
            first_name: payload.first_name,
            last_name: payload.last_name,
            password_hash: hash_password(&payload.password, &state.config.app_secret_key),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(views::user_short(&user))))
}

pub async fn list_users(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<UserView>>> {
    let limit = params.limit(state.config.page_size, state.config.max_page_size);
    let offset = params.offset(state.config.page_size, state.config.max_page_size);
    let viewer_id = viewer.0.map(|u| u.id);

    let users = identity::list_users(&state.pool, limit, offset).await?;
    let count = identity::count_users(&state.pool).await?;

    let mut results = Vec::with_capacity(users.len());
    for user in &users {
        results.push(views::user_view(&state.pool, user, viewer_id).await?);
    }

    Ok(Json(PageResponse { count, results }))
}

pub async fn get_user(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<i64>,
) -> Result<Json<UserView>> {
    let user = identity::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    let view = views::user_view(&state.pool, &user, viewer.0.map(|u| u.id)).await?;

    Ok(Json(view))
}

pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserView>> {
    let view = views::user_view(&state.pool, &user, Some(user.id)).await?;

    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    /// Inline `data:image/<ext>;base64,...` payload
    pub avatar: String,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

/// Replace the caller's avatar with an inline base64 upload
pub async fn set_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<AvatarRequest>,
) -> Result<Json<AvatarResponse>> {
    let image = parse_data_uri(&payload.avatar)?;

    let store = ImageStore::new(&state.config.media_root);
    if let Some(old) = &user.avatar {
        store.remove(old);
    }
    let stored = store.save_avatar(user.id, &image)?;

    identity::set_avatar(&state.pool, user.id, Some(&stored)).await?;

    Ok(Json(AvatarResponse { avatar: stored }))
}

pub async fn delete_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode> {
    if let Some(old) = &user.avatar {
        ImageStore::new(&state.config.media_root).remove(old);
    }
    identity::set_avatar(&state.pool, user.id, None).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Change the caller's password; the current password must match
pub async fn set_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<SetPasswordRequest>,
) -> Result<StatusCode> {
    if !verify_password(
        &payload.current_password,
        &state.config.app_secret_key,
        &user.password_hash,
    ) {
        return Err(AppError::Validation(
            "Current password is incorrect".to_string(),
        ));
    }

    if payload.new_password.is_empty() {
        return Err(AppError::Validation(
            "New password must not be empty".to_string(),
        ));
    }

    let new_hash = hash_password(&payload.new_password, &state.config.app_secret_key);
    identity::set_password_hash(&state.pool, user.id, &new_hash).await?;

    tracing::info!("User {} changed password", user.id);

    Ok(StatusCode::NO_CONTENT)
}
