//! Platesbook Server Library
//!
//! Recipe-sharing backend: accounts, an ingredient catalog, recipes with
//! per-recipe ingredient quantities, favorites, a shopping cart, and author
//! subscriptions. This module exports the core types and functions for
//! testing and reuse.

pub mod auth;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod image;
pub mod models;
pub mod pagination;
pub mod repo;
pub mod routes;
pub mod seed;
pub mod views;

pub use config::Config;
pub use db::{create_pool, MIGRATOR};
pub use error::{AppError, Result};

use sqlx::SqlitePool;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self { pool, config }
    }
}
