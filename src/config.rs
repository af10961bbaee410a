use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Server settings loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_path: String,
    pub schema_path: String,
    pub max_workers: usize,
    pub max_upload_bytes: usize,
    pub http_timeout: Duration,
    pub map_token: String,
    pub cloud_name: String,
    pub cloud_api_key: String,
    pub cloud_api_secret: String,
    pub media_folder: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // .env is optional, used in development
        let _ = dotenv();

        Ok(Self {
            bind_addr: var_or("BIND_ADDR", "127.0.0.1:3000")
                .parse()
                .context("BIND_ADDR must be a socket address like 127.0.0.1:3000")?,
            database_path: var_or("DATABASE_PATH", "listings.sqlite3"),
            schema_path: var_or("SCHEMA_PATH", "sql/schema.sql"),
            max_workers: var_or("MAX_WORKERS", "8")
                .parse()
                .context("MAX_WORKERS must be a valid number")?,
            max_upload_bytes: var_or("MAX_UPLOAD_BYTES", "10485760")
                .parse()
                .context("MAX_UPLOAD_BYTES must be a valid number")?,
            http_timeout: Duration::from_secs(
                var_or("HTTP_TIMEOUT_SECS", "30")
                    .parse()
                    .context("HTTP_TIMEOUT_SECS must be a valid number")?,
            ),
            map_token: env::var("MAP_TOKEN").context("MAP_TOKEN must be set")?,
            cloud_name: env::var("CLOUD_NAME").context("CLOUD_NAME must be set")?,
            cloud_api_key: env::var("CLOUD_API_KEY").context("CLOUD_API_KEY must be set")?,
            cloud_api_secret: env::var("CLOUD_API_SECRET")
                .context("CLOUD_API_SECRET must be set")?,
            media_folder: var_or("MEDIA_FOLDER", "listings_dev"),
        })
    }
}
