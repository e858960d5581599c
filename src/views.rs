//! Response shapes, selected explicitly per operation.
//!
//! The viewer-scoped flags (`is_subscribed`, `is_favorited`,
//! `is_in_shopping_cart`) are computed per request; anonymous viewers always
//! see `false`.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Recipe, RecipeIngredientRow, User};
use crate::repo::engagement::{self, EngagementKind};
use crate::repo::{identity, recipes};

/// Standard user shape with the viewer's subscription flag
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub is_subscribed: bool,
}

/// Registration response shape
#[derive(Debug, Serialize)]
pub struct UserShortView {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Full recipe shape with author, ingredients and viewer flags
#[derive(Debug, Serialize)]
pub struct RecipeDetailView {
    pub id: i64,
    pub author: UserView,
    pub ingredients: Vec<RecipeIngredientRow>,
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub prep_time: i64,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Trimmed recipe shape for favorite/cart responses and author listings
#[derive(Debug, Serialize)]
pub struct RecipeCompactView {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub prep_time: i64,
}

/// Author shape for subscription listings: user fields plus the author's
/// recipes (optionally truncated) and their unbounded total
#[derive(Debug, Serialize)]
pub struct SubscriptionAuthorView {
    #[serde(flatten)]
    pub user: UserView,
    pub recipes: Vec<RecipeCompactView>,
    pub recipes_count: i64,
}

pub fn user_short(user: &User) -> UserShortView {
    UserShortView {
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
    }
}

pub async fn user_view(pool: &SqlitePool, user: &User, viewer: Option<i64>) -> Result<UserView> {
    let is_subscribed = match viewer {
        Some(viewer_id) => identity::is_subscribed(pool, viewer_id, user.id).await?,
        None => false,
    };

    Ok(UserView {
        id: user.id,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        avatar: user.avatar.clone(),
        is_subscribed,
    })
}

pub fn recipe_compact(recipe: &Recipe) -> RecipeCompactView {
    RecipeCompactView {
        id: recipe.id,
        title: recipe.title.clone(),
        image: recipe.image.clone(),
        prep_time: recipe.prep_time,
    }
}

pub async fn recipe_detail(
    pool: &SqlitePool,
    recipe: &Recipe,
    viewer: Option<i64>,
) -> Result<RecipeDetailView> {
    let author = identity::find_by_id(pool, recipe.creator_id)
        .await?
        .ok_or(crate::error::AppError::UserNotFound)?;
    let author = user_view(pool, &author, viewer).await?;

    let ingredients = recipes::ingredient_rows(pool, recipe.id).await?;

    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(viewer_id) => (
            engagement::contains(pool, EngagementKind::Favorite, viewer_id, recipe.id).await?,
            engagement::contains(pool, EngagementKind::Cart, viewer_id, recipe.id).await?,
        ),
        None => (false, false),
    };

    Ok(RecipeDetailView {
        id: recipe.id,
        author,
        ingredients,
        title: recipe.title.clone(),
        image: recipe.image.clone(),
        description: recipe.description.clone(),
        prep_time: recipe.prep_time,
        is_favorited,
        is_in_shopping_cart,
    })
}

pub async fn subscription_author(
    pool: &SqlitePool,
    author: &User,
    viewer: Option<i64>,
    recipes_limit: Option<i64>,
) -> Result<SubscriptionAuthorView> {
    let user = user_view(pool, author, viewer).await?;

    let recipes = recipes::recipes_by_author(pool, author.id, recipes_limit)
        .await?
        .iter()
        .map(recipe_compact)
        .collect();
    let recipes_count = recipes::count_by_author(pool, author.id).await?;

    Ok(SubscriptionAuthorView {
        user,
        recipes,
        recipes_count,
    })
}
