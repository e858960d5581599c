use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::repo::engagement::{self, EngagementKind};
use crate::repo::recipes;
use crate::views::{self, RecipeCompactView};
use crate::AppState;

async fn add(
    state: &AppState,
    kind: EngagementKind,
    user_id: i64,
    recipe_id: i64,
) -> Result<RecipeCompactView> {
    let recipe = recipes::get_recipe(&state.pool, recipe_id)
        .await?
        .ok_or(AppError::RecipeNotFound)?;

    engagement::add(&state.pool, kind, user_id, recipe.id).await?;

    Ok(views::recipe_compact(&recipe))
}

async fn remove(
    state: &AppState,
    kind: EngagementKind,
    user_id: i64,
    recipe_id: i64,
) -> Result<()> {
    let recipe = recipes::get_recipe(&state.pool, recipe_id)
        .await?
        .ok_or(AppError::RecipeNotFound)?;

    engagement::remove(&state.pool, kind, user_id, recipe.id).await
}

pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeCompactView>)> {
    let view = add(&state, EngagementKind::Favorite, user.id, id).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    remove(&state, EngagementKind::Favorite, user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<RecipeCompactView>)> {
    let view = add(&state, EngagementKind::Cart, user.id, id).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    remove(&state, EngagementKind::Cart, user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
