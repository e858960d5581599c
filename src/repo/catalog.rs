use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::Ingredient;

pub async fn list_ingredients(pool: &SqlitePool) -> Result<Vec<Ingredient>> {
    let ingredients =
        sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients ORDER BY title, unit")
            .fetch_all(pool)
            .await?;

    Ok(ingredients)
}

pub async fn get_ingredient(pool: &SqlitePool, id: i64) -> Result<Option<Ingredient>> {
    let ingredient = sqlx::query_as::<_, Ingredient>("SELECT * FROM ingredients WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(ingredient)
}

/// Case-insensitive lookup by (title, unit); used to resolve fixture rows
pub async fn find_by_title_unit(
    pool: &SqlitePool,
    title: &str,
    unit: &str,
) -> Result<Option<Ingredient>> {
    let ingredient = sqlx::query_as::<_, Ingredient>(
        "SELECT * FROM ingredients WHERE LOWER(title) = LOWER(?) AND LOWER(unit) = LOWER(?)",
    )
    .bind(title)
    .bind(unit)
    .fetch_optional(pool)
    .await?;

    Ok(ingredient)
}

/// Insert a (title, unit) pair unless an equal pair (case-insensitive)
/// already exists. Returns true when a row was inserted.
pub async fn insert_if_missing(pool: &SqlitePool, title: &str, unit: &str) -> Result<bool> {
    if find_by_title_unit(pool, title, unit).await?.is_some() {
        return Ok(false);
    }

    sqlx::query("INSERT INTO ingredients (title, unit) VALUES (?, ?)")
        .bind(title)
        .bind(unit)
        .execute(pool)
        .await?;

    Ok(true)
}

pub async fn count_ingredients(pool: &SqlitePool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ingredients")
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}
