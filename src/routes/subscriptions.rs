use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::pagination::{PageParams, PageResponse};
use crate::repo::identity;
use crate::views::{self, SubscriptionAuthorView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubscriptionParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Truncates each author's recipe list; their count stays unbounded
    pub recipes_limit: Option<i64>,
}

/// Authors the caller is subscribed to, as paginated author views
pub async fn list_subscriptions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<SubscriptionParams>,
) -> Result<Json<PageResponse<SubscriptionAuthorView>>> {
    let page = PageParams {
        page: params.page,
        limit: params.limit,
    };
    let limit = page.limit(state.config.page_size, state.config.max_page_size);
    let offset = page.offset(state.config.page_size, state.config.max_page_size);

    let authors = identity::subscribed_authors(&state.pool, user.id, limit, offset).await?;
    let count = identity::count_subscriptions(&state.pool, user.id).await?;

    let mut results = Vec::with_capacity(authors.len());
    for author in &authors {
        results.push(
            views::subscription_author(&state.pool, author, Some(user.id), params.recipes_limit)
                .await?,
        );
    }

    Ok(Json(PageResponse { count, results }))
}

#[derive(Debug, Deserialize)]
pub struct SubscribeParams {
    pub recipes_limit: Option<i64>,
}

/// Subscribe the caller to an author's recipe feed
pub async fn subscribe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Query(params): Query<SubscribeParams>,
) -> Result<(StatusCode, Json<SubscriptionAuthorView>)> {
    let author = identity::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    identity::subscribe(&state.pool, user.id, author.id).await?;

    let view =
        views::subscription_author(&state.pool, &author, Some(user.id), params.recipes_limit)
            .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Remove the caller's subscription; a missing subscription is a client error
pub async fn unsubscribe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let author = identity::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    identity::unsubscribe(&state.pool, user.id, author.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
