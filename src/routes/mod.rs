pub mod auth;
pub mod engagement;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod subscriptions;
pub mod users;

use axum::routing::{get, post, put};
use axum::Router;

use crate::AppState;

/// Assemble the full route table; shared by the binary and the test suite
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/token/login", post(auth::login))
        .route("/api/auth/token/logout", post(auth::logout))
        .route("/api/users", get(users::list_users).post(users::register_user))
        .route("/api/users/me", get(users::current_user))
        .route(
            "/api/users/me/avatar",
            put(users::set_avatar).delete(users::delete_avatar),
        )
        .route("/api/users/set_password", post(users::set_password))
        .route(
            "/api/users/subscriptions",
            get(subscriptions::list_subscriptions),
        )
        .route("/api/users/:id", get(users::get_user))
        .route(
            "/api/users/:id/subscribe",
            post(subscriptions::subscribe).delete(subscriptions::unsubscribe),
        )
        .route("/api/ingredients", get(ingredients::list_ingredients))
        .route("/api/ingredients/:id", get(ingredients::get_ingredient))
        .route(
            "/api/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/api/recipes/:id",
            get(recipes::get_recipe)
                .patch(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route(
            "/api/recipes/:id/favorite",
            post(engagement::add_favorite).delete(engagement::remove_favorite),
        )
        .route(
            "/api/recipes/:id/shopping_cart",
            post(engagement::add_to_cart).delete(engagement::remove_from_cart),
        )
        .with_state(state)
}
