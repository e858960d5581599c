//! One-shot fixture load, run by `main` after migrations.
//!
//! Three passes (users, ingredients, recipes), each keyed on a unique field
//! and skipping rows that already exist, so re-running the job any number of
//! times adds nothing and fails nothing. Unresolvable fixture rows are logged
//! and skipped; the job continues.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::auth::hash_password;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::image::ImageStore;
use crate::models::{IngredientAmount, NewUser};
use crate::repo::{catalog, identity, recipes};

#[derive(Debug, Deserialize)]
struct FixtureUser {
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    password: String,
    #[serde(default)]
    avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FixtureIngredient {
    title: String,
    unit: String,
}

#[derive(Debug, Deserialize)]
struct FixtureRecipeIngredient {
    title: String,
    unit: String,
    amount: i64,
}

#[derive(Debug, Deserialize)]
struct FixtureRecipe {
    author_email: String,
    title: String,
    description: String,
    prep_time: i64,
    #[serde(default)]
    image: Option<String>,
    ingredients: Vec<FixtureRecipeIngredient>,
}

/// Run all seeding passes. Invoked once at startup; safe to invoke again.
pub async fn run(pool: &SqlitePool, config: &Config) -> Result<()> {
    let store = ImageStore::new(&config.media_root);

    let users: Vec<FixtureUser> = load_fixture(&config.fixtures_dir, "users.json");
    if !users.is_empty() {
        seed_users(pool, config, &store, users).await?;
    }

    let ingredients: Vec<FixtureIngredient> = load_fixture(&config.fixtures_dir, "ingredients.json");
    if !ingredients.is_empty() {
        seed_ingredients(pool, ingredients).await?;
    }

    let recipe_fixtures: Vec<FixtureRecipe> = load_fixture(&config.fixtures_dir, "recipes.json");
    if !recipe_fixtures.is_empty() {
        seed_recipes(pool, config, &store, recipe_fixtures).await?;
    }

    Ok(())
}

/// Read a JSON fixture; a missing or malformed file is logged and treated
/// as empty rather than aborting startup.
fn load_fixture<T: DeserializeOwned>(dir: &str, name: &str) -> Vec<T> {
    let path = Path::new(dir).join(name);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(_) => {
            tracing::error!("Fixture file {} not found at {:?}", name, path);
            return Vec::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Fixture file {} is not valid JSON: {}", name, e);
            Vec::new()
        }
    }
}

/// Create-if-absent baseline accounts, keyed on email
async fn seed_users(
    pool: &SqlitePool,
    config: &Config,
    store: &ImageStore,
    users: Vec<FixtureUser>,
) -> Result<()> {
    for fixture in users {
        if identity::find_by_email(pool, &fixture.email).await?.is_some() {
            tracing::info!("User {} already exists", fixture.email);
            continue;
        }

        let user = identity::create_user(
            pool,
            NewUser {
                email: fixture.email.clone(),
                username: fixture.username,
                first_name: fixture.first_name,
                last_name: fixture.last_name,
                password_hash: hash_password(&fixture.password, &config.app_secret_key),
            },
        )
        .await?;

        if let Some(avatar) = &fixture.avatar {
            let src = Path::new(&config.media_root).join(avatar);
            if let Some(stored) =
                store.adopt_file(&src, &format!("avatars/{}", user.id), "avatar")?
            {
                identity::set_avatar(pool, user.id, Some(&stored)).await?;
            }
        }

        tracing::info!("Seeded user: {}", fixture.email);
    }

    Ok(())
}

/// Insert fixture (title, unit) pairs not already in the catalog,
/// compared case-insensitively
async fn seed_ingredients(pool: &SqlitePool, ingredients: Vec<FixtureIngredient>) -> Result<()> {
    let mut inserted = 0;
    for fixture in ingredients {
        if catalog::insert_if_missing(pool, &fixture.title, &fixture.unit).await? {
            inserted += 1;
        }
    }

    tracing::info!("Seeded ingredients: {} inserted", inserted);

    Ok(())
}

/// Create-if-absent recipes keyed on (creator, title); existing recipes are
/// left untouched
async fn seed_recipes(
    pool: &SqlitePool,
    config: &Config,
    store: &ImageStore,
    fixtures: Vec<FixtureRecipe>,
) -> Result<()> {
    for fixture in fixtures {
        let Some(author) = identity::find_by_email(pool, &fixture.author_email).await? else {
            tracing::error!(
                "Author {} not found, skipping recipe {:?}",
                fixture.author_email,
                fixture.title
            );
            continue;
        };

        if recipes::find_by_creator_title(pool, author.id, &fixture.title)
            .await?
            .is_some()
        {
            tracing::info!("Recipe {:?} already exists", fixture.title);
            continue;
        }

        // Resolve fixture ingredient references before creating the recipe;
        // unresolved references are skipped, not fatal.
        let mut links = Vec::new();
        for item in &fixture.ingredients {
            match catalog::find_by_title_unit(pool, &item.title, &item.unit).await? {
                Some(ingredient) => links.push(IngredientAmount {
                    id: ingredient.id,
                    amount: item.amount,
                }),
                None => tracing::warn!(
                    "Ingredient ({}, {}) not found for recipe {:?}",
                    item.title,
                    item.unit,
                    fixture.title
                ),
            }
        }

        if links.is_empty() {
            tracing::error!(
                "No resolvable ingredients for recipe {:?}, skipped",
                fixture.title
            );
            continue;
        }

        // A fixture row that fails validation is skipped like any other
        // unresolvable row; only database and I/O failures abort the job.
        let recipe = match recipes::create_recipe(
            pool,
            config,
            author.id,
            recipes::RecipeDraft {
                title: fixture.title.clone(),
                description: fixture.description,
                prep_time: fixture.prep_time,
                ingredients: links,
            },
        )
        .await
        {
            Ok(recipe) => recipe,
            Err(AppError::Validation(msg)) => {
                tracing::error!("Recipe {:?} is invalid ({}), skipped", fixture.title, msg);
                continue;
            }
            Err(e) => return Err(e),
        };

        if let Some(image) = &fixture.image {
            let src = Path::new(&config.media_root).join(image);
            if let Some(stored) =
                store.adopt_file(&src, &format!("recipes/{}", recipe.id), "image")?
            {
                recipes::set_image(pool, recipe.id, Some(&stored)).await?;
            }
        }

        tracing::info!("Seeded recipe: {:?}", fixture.title);
    }

    Ok(())
}
