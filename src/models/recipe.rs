use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::{ERR_DUPLICATE_INGREDIENTS, ERR_EMPTY_INGREDIENTS};
use crate::error::{AppError, Result};

/// Recipe row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub creator_id: i64,
    pub title: String,
    pub description: String,
    /// Media-root relative path to the recipe image, if one was uploaded
    pub image: Option<String>,
    /// Preparation time in minutes
    pub prep_time: i64,
    /// Set once at creation, never updated
    pub created_at: DateTime<Utc>,
}

/// One (ingredient id, quantity) entry of a recipe submission
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientAmount {
    pub id: i64,
    pub amount: i64,
}

/// Joined recipe-ingredient row for detail views
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RecipeIngredientRow {
    pub id: i64,
    pub title: String,
    pub unit: String,
    pub amount: i64,
}

/// Reject empty ingredient lists and repeated ingredient ids before any
/// row is written.
pub fn validate_ingredient_refs(ingredients: &[IngredientAmount]) -> Result<()> {
    if ingredients.is_empty() {
        return Err(AppError::Validation(ERR_EMPTY_INGREDIENTS.to_string()));
    }

    let mut seen = HashSet::new();
    for item in ingredients {
        if !seen.insert(item.id) {
            return Err(AppError::Validation(ERR_DUPLICATE_INGREDIENTS.to_string()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(id: i64) -> IngredientAmount {
        IngredientAmount { id, amount: 10 }
    }

    #[test]
    fn test_empty_ingredient_list_rejected() {
        assert!(matches!(
            validate_ingredient_refs(&[]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_ingredient_ids_rejected() {
        let list = [amount(1), amount(2), amount(1)];
        assert!(matches!(
            validate_ingredient_refs(&list),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_distinct_ingredient_ids_accepted() {
        let list = [amount(1), amount(2), amount(3)];
        assert!(validate_ingredient_refs(&list).is_ok());
    }
}
