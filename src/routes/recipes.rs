use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::{AuthUser, MaybeAuthUser};
use crate::constants::ERR_INGREDIENTS_REQUIRED;
use crate::error::{AppError, Result};
use crate::image::{parse_data_uri, DecodedImage, ImageStore};
use crate::models::{IngredientAmount, Recipe};
use crate::pagination::{PageParams, PageResponse};
use crate::repo::recipes::{self, RecipeChanges, RecipeDraft};
use crate::views::{self, RecipeDetailView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub prep_time: i64,
    /// Optional inline `data:image/<ext>;base64,...` payload
    pub image: Option<String>,
    pub ingredients: Vec<IngredientAmount>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub prep_time: Option<i64>,
    pub image: Option<String>,
    /// Mandatory on every update, partial or full
    pub ingredients: Option<Vec<IngredientAmount>>,
}

/// All recipes, newest first, with viewer-scoped flags
pub async fn list_recipes(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<PageResponse<RecipeDetailView>>> {
    let limit = params.limit(state.config.page_size, state.config.max_page_size);
    let offset = params.offset(state.config.page_size, state.config.max_page_size);
    let viewer_id = viewer.0.map(|u| u.id);

    let recipes = recipes::list_recipes(&state.pool, limit, offset).await?;
    let count = recipes::count_recipes(&state.pool).await?;

    let mut results = Vec::with_capacity(recipes.len());
    for recipe in &recipes {
        results.push(views::recipe_detail(&state.pool, recipe, viewer_id).await?);
    }

    Ok(Json(PageResponse { count, results }))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetailView>> {
    let recipe = recipes::get_recipe(&state.pool, id)
        .await?
        .ok_or(AppError::RecipeNotFound)?;

    let view = views::recipe_detail(&state.pool, &recipe, viewer.0.map(|u| u.id)).await?;

    Ok(Json(view))
}

/// Publish a new recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetailView>)> {
    if payload.title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    // Decode before any row is written so a bad payload mutates nothing
    let image = payload.image.as_deref().map(parse_data_uri).transpose()?;

    let recipe = recipes::create_recipe(
        &state.pool,
        &state.config,
        user.id,
        RecipeDraft {
            title: payload.title,
            description: payload.description,
            prep_time: payload.prep_time,
            ingredients: payload.ingredients,
        },
    )
    .await?;

    let recipe = match image {
        Some(image) => {
            let store = ImageStore::new(&state.config.media_root);
            match attach_image(&state, &store, recipe.id, &image).await {
                Ok(recipe) => recipe,
                // A failed media write must not leave a half-created recipe
                Err(e) => {
                    recipes::delete_recipe(&state.pool, recipe.id).await?;
                    return Err(e);
                }
            }
        }
        None => recipe,
    };

    let view = views::recipe_detail(&state.pool, &recipe, Some(user.id)).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Store an uploaded image for a freshly created recipe and record its path.
/// The file is removed again if the path cannot be recorded.
async fn attach_image(
    state: &AppState,
    store: &ImageStore,
    recipe_id: i64,
    image: &DecodedImage,
) -> Result<Recipe> {
    let stored = store.save_recipe_image(recipe_id, image)?;

    if let Err(e) = recipes::set_image(&state.pool, recipe_id, Some(&stored)).await {
        store.remove(&stored);
        return Err(e);
    }

    recipes::get_recipe(&state.pool, recipe_id)
        .await?
        .ok_or(AppError::RecipeNotFound)
}

/// Update a recipe; creator only. The ingredient list is replaced wholesale
/// and must be supplied on every update.
pub async fn update_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeDetailView>> {
    let recipe = recipes::get_recipe(&state.pool, id)
        .await?
        .ok_or(AppError::RecipeNotFound)?;

    if recipe.creator_id != user.id {
        return Err(AppError::Forbidden);
    }

    let ingredients = payload
        .ingredients
        .ok_or_else(|| AppError::Validation(ERR_INGREDIENTS_REQUIRED.to_string()))?;

    let image = payload.image.as_deref().map(parse_data_uri).transpose()?;

    // The replacement file goes to disk before any row changes; its path is
    // committed together with the fields and links, and the old file is only
    // removed once the transaction has succeeded.
    let store = ImageStore::new(&state.config.media_root);
    let stored = image
        .as_ref()
        .map(|image| store.save_recipe_image(recipe.id, image))
        .transpose()?;

    let updated = match recipes::update_recipe(
        &state.pool,
        &state.config,
        &recipe,
        RecipeChanges {
            title: payload.title,
            description: payload.description,
            prep_time: payload.prep_time,
            image: stored.clone(),
            ingredients,
        },
    )
    .await
    {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(new_path) = &stored {
                if recipe.image.as_deref() != Some(new_path.as_str()) {
                    store.remove(new_path);
                }
            }
            return Err(e);
        }
    };

    if let (Some(new_path), Some(old)) = (&stored, &recipe.image) {
        if old != new_path {
            store.remove(old);
        }
    }

    let view = views::recipe_detail(&state.pool, &updated, Some(user.id)).await?;

    Ok(Json(view))
}

/// Delete a recipe; creator only
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let recipe = recipes::get_recipe(&state.pool, id)
        .await?
        .ok_or(AppError::RecipeNotFound)?;

    if recipe.creator_id != user.id {
        return Err(AppError::Forbidden);
    }

    if let Some(image) = &recipe.image {
        ImageStore::new(&state.config.media_root).remove(image);
    }
    recipes::delete_recipe(&state.pool, recipe.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
