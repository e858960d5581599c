use sqlx::SqlitePool;

use crate::error::{AppError, Result};

/// Favorite and shopping-cart relations share one lifecycle; only the table
/// and the client-error messages differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementKind {
    Favorite,
    Cart,
}

impl EngagementKind {
    fn table(self) -> &'static str {
        match self {
            EngagementKind::Favorite => "favorites",
            EngagementKind::Cart => "shopping_list",
        }
    }

    fn duplicate_error(self) -> AppError {
        match self {
            EngagementKind::Favorite => AppError::AlreadyFavorited,
            EngagementKind::Cart => AppError::AlreadyInCart,
        }
    }

    fn missing_error(self) -> AppError {
        match self {
            EngagementKind::Favorite => AppError::NotFavorited,
            EngagementKind::Cart => AppError::NotInCart,
        }
    }
}

/// Add a (user, recipe) entry; duplicates are a client error
pub async fn add(
    pool: &SqlitePool,
    kind: EngagementKind,
    user_id: i64,
    recipe_id: i64,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let query = format!(
        "SELECT id FROM {} WHERE user_id = ? AND recipe_id = ?",
        kind.table()
    );
    let exists: Option<(i64,)> = sqlx::query_as(&query)
        .bind(user_id)
        .bind(recipe_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_some() {
        return Err(kind.duplicate_error());
    }

    let query = format!(
        "INSERT INTO {} (user_id, recipe_id) VALUES (?, ?)",
        kind.table()
    );
    sqlx::query(&query)
        .bind(user_id)
        .bind(recipe_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// Remove a (user, recipe) entry; removing an absent one is a client error
pub async fn remove(
    pool: &SqlitePool,
    kind: EngagementKind,
    user_id: i64,
    recipe_id: i64,
) -> Result<()> {
    let query = format!(
        "DELETE FROM {} WHERE user_id = ? AND recipe_id = ?",
        kind.table()
    );
    let result = sqlx::query(&query)
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(kind.missing_error());
    }

    Ok(())
}

/// Membership test backing the per-viewer view flags
pub async fn contains(
    pool: &SqlitePool,
    kind: EngagementKind,
    user_id: i64,
    recipe_id: i64,
) -> Result<bool> {
    let query = format!(
        "SELECT id FROM {} WHERE user_id = ? AND recipe_id = ?",
        kind.table()
    );
    let exists: Option<(i64,)> = sqlx::query_as(&query)
        .bind(user_id)
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?;

    Ok(exists.is_some())
}
