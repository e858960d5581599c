use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{ERR_ALREADY_SUBSCRIBED, ERR_NOT_SUBSCRIBED, ERR_SELF_SUBSCRIPTION};

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid image payload: {0}")]
    InvalidImage(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Not the recipe creator")]
    Forbidden,

    #[error("Email already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Recipe not found")]
    RecipeNotFound,

    #[error("Ingredient {0} not found")]
    IngredientNotFound(i64),

    #[error("Self-subscription is not allowed")]
    SelfSubscription,

    #[error("Already subscribed")]
    AlreadySubscribed,

    #[error("Not subscribed")]
    NotSubscribed,

    #[error("Recipe already in favorites")]
    AlreadyFavorited,

    #[error("Recipe not in favorites")]
    NotFavorited,

    #[error("Recipe already in shopping cart")]
    AlreadyInCart,

    #[error("Recipe not in shopping cart")]
    NotInCart,
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Migrate(ref e) => {
                tracing::error!("Migration error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("I/O error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidImage(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid image payload: {msg}"),
            ),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                "Unable to log in with provided credentials".to_string(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication credentials were not provided or are invalid".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Only the creator may modify this recipe".to_string(),
            ),
            AppError::EmailTaken => (
                StatusCode::BAD_REQUEST,
                "A user with this email already exists".to_string(),
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AppError::RecipeNotFound => (StatusCode::NOT_FOUND, "Recipe not found".to_string()),
            AppError::IngredientNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Ingredient {id} not found"),
            ),
            AppError::SelfSubscription => {
                (StatusCode::BAD_REQUEST, ERR_SELF_SUBSCRIPTION.to_string())
            }
            AppError::AlreadySubscribed => {
                (StatusCode::BAD_REQUEST, ERR_ALREADY_SUBSCRIBED.to_string())
            }
            AppError::NotSubscribed => (StatusCode::BAD_REQUEST, ERR_NOT_SUBSCRIBED.to_string()),
            AppError::AlreadyFavorited => (
                StatusCode::BAD_REQUEST,
                "Recipe is already in favorites".to_string(),
            ),
            AppError::NotFavorited => (
                StatusCode::BAD_REQUEST,
                "Recipe is not in favorites".to_string(),
            ),
            AppError::AlreadyInCart => (
                StatusCode::BAD_REQUEST,
                "Recipe is already in the shopping cart".to_string(),
            ),
            AppError::NotInCart => (
                StatusCode::BAD_REQUEST,
                "Recipe is not in the shopping cart".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
