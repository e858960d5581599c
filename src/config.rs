use std::env;

use crate::constants::{
    DEFAULT_MAX_COOKING_TIME, DEFAULT_MAX_INGREDIENT_AMOUNT, DEFAULT_MIN_COOKING_TIME,
    DEFAULT_MIN_INGREDIENT_AMOUNT, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub media_root: String,
    pub fixtures_dir: String,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    pub app_secret_key: String,
    pub min_cooking_time: i64,
    pub max_cooking_time: i64,
    pub min_ingredient_amount: i64,
    pub max_ingredient_amount: i64,
    pub page_size: i64,
    pub max_page_size: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/platesbook.db".to_string());

        let media_root = env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".to_string());

        let fixtures_dir = env::var("FIXTURES_DIR").unwrap_or_else(|_| "./data".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let app_secret_key = env::var("APP_SECRET_KEY")
            .map_err(|_| "APP_SECRET_KEY must be set for password and token hashing")?;

        let min_cooking_time = parse_i64("MIN_COOKING_TIME", DEFAULT_MIN_COOKING_TIME)?;
        let max_cooking_time = parse_i64("MAX_COOKING_TIME", DEFAULT_MAX_COOKING_TIME)?;
        let min_ingredient_amount =
            parse_i64("MIN_INGREDIENT_AMOUNT", DEFAULT_MIN_INGREDIENT_AMOUNT)?;
        let max_ingredient_amount =
            parse_i64("MAX_INGREDIENT_AMOUNT", DEFAULT_MAX_INGREDIENT_AMOUNT)?;
        let page_size = parse_i64("PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let max_page_size = parse_i64("MAX_PAGE_SIZE", MAX_PAGE_SIZE)?;

        Ok(Config {
            server_host,
            server_port,
            database_path,
            media_root,
            fixtures_dir,
            allowed_origins,
            environment,
            app_secret_key,
            min_cooking_time,
            max_cooking_time,
            min_ingredient_amount,
            max_ingredient_amount,
            page_size,
            max_page_size,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_i64(name: &str, default: i64) -> Result<i64, String> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| format!("Invalid {name}")),
        Err(_) => Ok(default),
    }
}
