use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::models::Ingredient;
use crate::repo::catalog;
use crate::AppState;

/// Full catalog, ordered by title
pub async fn list_ingredients(State(state): State<AppState>) -> Result<Json<Vec<Ingredient>>> {
    let ingredients = catalog::list_ingredients(&state.pool).await?;

    Ok(Json(ingredients))
}

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ingredient>> {
    let ingredient = catalog::get_ingredient(&state.pool, id)
        .await?
        .ok_or(AppError::IngredientNotFound(id))?;

    Ok(Json(ingredient))
}
