use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::recipe::validate_ingredient_refs;
use crate::models::{IngredientAmount, Recipe, RecipeIngredientRow};

/// Fields of a recipe create submission, validated before any row is written
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub prep_time: i64,
    pub ingredients: Vec<IngredientAmount>,
}

/// Fields of a recipe update. Scalar fields are optional (partial update);
/// the ingredient list is mandatory on every update.
#[derive(Debug, Clone)]
pub struct RecipeChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub prep_time: Option<i64>,
    /// Stored media path for a replacement image. The file must already be
    /// on disk; the path is recorded in the same transaction as the other
    /// fields so a failed update never points at a half-applied state.
    pub image: Option<String>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Check prep time and every quantity against the configured bounds, and the
/// ingredient list against the empty/duplicate rules.
pub fn validate_submission(
    config: &Config,
    prep_time: i64,
    ingredients: &[IngredientAmount],
) -> Result<()> {
    if prep_time < config.min_cooking_time || prep_time > config.max_cooking_time {
        return Err(AppError::Validation(format!(
            "Preparation time must be between {} and {} minutes",
            config.min_cooking_time, config.max_cooking_time
        )));
    }

    validate_ingredient_refs(ingredients)?;

    for item in ingredients {
        if item.amount < config.min_ingredient_amount || item.amount > config.max_ingredient_amount
        {
            return Err(AppError::Validation(format!(
                "Ingredient amount must be between {} and {}",
                config.min_ingredient_amount, config.max_ingredient_amount
            )));
        }
    }

    Ok(())
}

/// Insert the link rows for a recipe, verifying each referenced ingredient
/// exists. Runs inside the caller's transaction.
async fn link_ingredients(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: i64,
    ingredients: &[IngredientAmount],
) -> Result<()> {
    for item in ingredients {
        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM ingredients WHERE id = ?")
            .bind(item.id)
            .fetch_optional(&mut **tx)
            .await?;
        if exists.is_none() {
            // Submissions referencing unknown ingredients are a validation
            // error, not a lookup miss
            return Err(AppError::Validation(format!(
                "Ingredient {} does not exist",
                item.id
            )));
        }

        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity) VALUES (?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(item.id)
        .bind(item.amount)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Create a recipe and its ingredient links in one transaction
pub async fn create_recipe(
    pool: &SqlitePool,
    config: &Config,
    creator_id: i64,
    draft: RecipeDraft,
) -> Result<Recipe> {
    validate_submission(config, draft.prep_time, &draft.ingredients)?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO recipes (creator_id, title, description, prep_time, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(creator_id)
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(draft.prep_time)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;
    let recipe_id = result.last_insert_rowid();

    link_ingredients(&mut tx, recipe_id, &draft.ingredients).await?;

    tx.commit().await?;

    tracing::info!("Recipe {} created by user {}", recipe_id, creator_id);

    get_recipe(pool, recipe_id)
        .await?
        .ok_or(AppError::RecipeNotFound)
}

/// Apply a recipe update with full-replace link semantics.
///
/// The prior link set is deleted and the new set inserted in the same
/// transaction as the field update, so a failed update leaves the recipe and
/// its links untouched.
pub async fn update_recipe(
    pool: &SqlitePool,
    config: &Config,
    recipe: &Recipe,
    changes: RecipeChanges,
) -> Result<Recipe> {
    let prep_time = changes.prep_time.unwrap_or(recipe.prep_time);
    validate_submission(config, prep_time, &changes.ingredients)?;

    let title = changes.title.unwrap_or_else(|| recipe.title.clone());
    let description = changes
        .description
        .unwrap_or_else(|| recipe.description.clone());
    let image = changes.image.or_else(|| recipe.image.clone());

    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE recipes SET title = ?, description = ?, prep_time = ?, image = ? WHERE id = ?",
    )
    .bind(&title)
    .bind(&description)
    .bind(prep_time)
    .bind(&image)
    .bind(recipe.id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(recipe.id)
        .execute(&mut *tx)
        .await?;

    link_ingredients(&mut tx, recipe.id, &changes.ingredients).await?;

    tx.commit().await?;

    tracing::info!("Recipe {} updated", recipe.id);

    get_recipe(pool, recipe.id)
        .await?
        .ok_or(AppError::RecipeNotFound)
}

pub async fn get_recipe(pool: &SqlitePool, id: i64) -> Result<Option<Recipe>> {
    let recipe = sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(recipe)
}

/// All recipes, newest first
pub async fn list_recipes(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<Recipe>> {
    let recipes = sqlx::query_as::<_, Recipe>(
        "SELECT * FROM recipes ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

pub async fn count_recipes(pool: &SqlitePool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}

/// An author's recipes, newest first, optionally truncated.
///
/// The truncation limit only shortens the returned list; the author's total
/// comes from [`count_by_author`].
pub async fn recipes_by_author(
    pool: &SqlitePool,
    author_id: i64,
    limit: Option<i64>,
) -> Result<Vec<Recipe>> {
    let limit = limit.unwrap_or(i64::MAX).max(0);

    let recipes = sqlx::query_as::<_, Recipe>(
        "SELECT * FROM recipes WHERE creator_id = ? ORDER BY id DESC LIMIT ?",
    )
    .bind(author_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

pub async fn count_by_author(pool: &SqlitePool, author_id: i64) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes WHERE creator_id = ?")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}

/// Lookup a recipe by its unique seed key
pub async fn find_by_creator_title(
    pool: &SqlitePool,
    creator_id: i64,
    title: &str,
) -> Result<Option<Recipe>> {
    let recipe =
        sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE creator_id = ? AND title = ?")
            .bind(creator_id)
            .bind(title)
            .fetch_optional(pool)
            .await?;

    Ok(recipe)
}

pub async fn set_image(pool: &SqlitePool, recipe_id: i64, image: Option<&str>) -> Result<()> {
    sqlx::query("UPDATE recipes SET image = ? WHERE id = ?")
        .bind(image)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Joined ingredient rows for a recipe detail view
pub async fn ingredient_rows(pool: &SqlitePool, recipe_id: i64) -> Result<Vec<RecipeIngredientRow>> {
    let rows = sqlx::query_as::<_, RecipeIngredientRow>(
        "SELECT i.id AS id, i.title AS title, i.unit AS unit, ri.quantity AS amount \
         FROM recipe_ingredients ri \
         JOIN ingredients i ON i.id = ri.ingredient_id \
         WHERE ri.recipe_id = ? \
         ORDER BY i.title",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Delete a recipe; links, favorites and cart entries go with it via cascades
pub async fn delete_recipe(pool: &SqlitePool, recipe_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .execute(pool)
        .await?;

    tracing::info!("Recipe {} deleted", recipe_id);

    Ok(())
}
