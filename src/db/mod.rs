// Database module - SQLite access through a sqlx pool

use std::str::FromStr;

use color_eyre::{eyre::ensure, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub mod models;

mod migrations;
mod question;
mod result;
mod status;
mod user;

const MAX_CONNECTIONS: u32 = 5;

// Main database handle
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Open (creating if needed) the database at `url` and bring its schema up to date.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let one: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
        ensure!(one == 1, "connection check failed");

        migrations::run(&pool).await?;

        tracing::info!("database connection has been verified");

        Ok(Self { pool })
    }

    pub async fn migration_applied(&self, version: &str) -> Result<bool> {
        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM schema_migrations WHERE version = ?)",
        )
        .bind(version)
        .fetch_one(&self.pool)
        .await?;

        Ok(applied)
    }
}
