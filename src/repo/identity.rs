use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::models::{NewUser, User};

/// Create a new account; the email must not already be registered
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User> {
    if find_by_email(pool, &new_user.email).await?.is_some() {
        return Err(AppError::EmailTaken);
    }

    let result = sqlx::query(
        "INSERT INTO users (email, username, first_name, last_name, password_hash, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&new_user.email)
    .bind(&new_user.username)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.password_hash)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let user = find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::UserNotFound)?;

    tracing::info!("New user registered: {}", user.email);

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn list_users(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id LIMIT ? OFFSET ?")
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(users)
}

pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}

pub async fn set_password_hash(pool: &SqlitePool, user_id: i64, password_hash: &str) -> Result<()> {
    sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn set_avatar(pool: &SqlitePool, user_id: i64, avatar: Option<&str>) -> Result<()> {
    sqlx::query("UPDATE users SET avatar = ? WHERE id = ?")
        .bind(avatar)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Subscribe `subscriber_id` to `author_id`'s recipe feed.
///
/// Self-subscriptions and duplicates are rejected, never silently ignored.
pub async fn subscribe(pool: &SqlitePool, subscriber_id: i64, author_id: i64) -> Result<()> {
    if subscriber_id == author_id {
        return Err(AppError::SelfSubscription);
    }

    let mut tx = pool.begin().await?;

    let exists: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM subscriptions WHERE subscriber_id = ? AND author_id = ?")
            .bind(subscriber_id)
            .bind(author_id)
            .fetch_optional(&mut *tx)
            .await?;
    if exists.is_some() {
        return Err(AppError::AlreadySubscribed);
    }

    sqlx::query("INSERT INTO subscriptions (subscriber_id, author_id) VALUES (?, ?)")
        .bind(subscriber_id)
        .bind(author_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!("User {} subscribed to user {}", subscriber_id, author_id);

    Ok(())
}

/// Remove a subscription; removing one that does not exist is a client error
pub async fn unsubscribe(pool: &SqlitePool, subscriber_id: i64, author_id: i64) -> Result<()> {
    let result =
        sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = ? AND author_id = ?")
            .bind(subscriber_id)
            .bind(author_id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotSubscribed);
    }

    tracing::info!("User {} unsubscribed from user {}", subscriber_id, author_id);

    Ok(())
}

pub async fn is_subscribed(pool: &SqlitePool, subscriber_id: i64, author_id: i64) -> Result<bool> {
    let exists: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM subscriptions WHERE subscriber_id = ? AND author_id = ?")
            .bind(subscriber_id)
            .bind(author_id)
            .fetch_optional(pool)
            .await?;

    Ok(exists.is_some())
}

/// Authors the given user is subscribed to, in subscription order
pub async fn subscribed_authors(
    pool: &SqlitePool,
    subscriber_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>> {
    let authors = sqlx::query_as::<_, User>(
        "SELECT u.* FROM users u \
         JOIN subscriptions s ON s.author_id = u.id \
         WHERE s.subscriber_id = ? \
         ORDER BY s.id \
         LIMIT ? OFFSET ?",
    )
    .bind(subscriber_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(authors)
}

pub async fn count_subscriptions(pool: &SqlitePool, subscriber_id: i64) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subscriptions WHERE subscriber_id = ?")
        .bind(subscriber_id)
        .fetch_one(pool)
        .await?;

    Ok(count.0)
}
