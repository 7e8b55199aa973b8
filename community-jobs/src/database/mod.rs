//! Database layer for the community bot jobs.
//!
//! MySQL persistence for:
//! - Seen facts (the fun-fact novelty set)
//! - Job run audit rows
//! - Queries against the bot-owned community tables (channels, list items)
//!
//! The module is organized into submodules:
//! - `records` - Record types (entities)
//! - `facts` - `FactStore` implementation for the `fact` table
//! - `community` - Queries against the bot's `slack_channel` / `list` tables
//! - `runs` - Job run audit rows
//!
//! Only the `fact` and `job_run` tables are owned (and created) here; the
//! community tables belong to the bot and are never created or migrated by
//! the jobs.

mod community;
mod facts;
mod records;
mod runs;

pub use records::*;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{MySql, Pool};
use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::constants::defaults;
use crate::errors::{JobError, PersistenceError};

/// Persistence contract for the fun-fact novelty set.
///
/// Idempotency is not guaranteed: callers must check then insert, and two
/// concurrent runs may both insert the same pair. The table carries no
/// uniqueness constraint, so a double insert is accepted rather than fixed.
#[async_trait]
pub trait FactStore: Send + Sync {
    async fn fact_exists(&self, text: &str, source: &str) -> Result<bool, JobError>;
    async fn insert_fact(&self, text: &str, source: &str) -> Result<(), JobError>;
}

pub struct Database {
    pool: Pool<MySql>,
}

impl Database {
    /// Expose pool for integration test queries
    #[allow(dead_code)]
    pub fn pool(&self) -> &Pool<MySql> {
        &self.pool
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, JobError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);
        info!(
            "Connecting to database '{}' on {} as {}",
            config.database, config.host, config.user
        );
        Self::connect_with(options).await
    }

    /// Connect from a `mysql://` URL. Used by the live database tests.
    pub async fn connect_url(url: &str) -> Result<Self, JobError> {
        let options: MySqlConnectOptions = url.parse().map_err(|e: sqlx::Error| {
            JobError::Persistence(PersistenceError::ConnectionFailed {
                reason: e.to_string(),
            })
        })?;
        Self::connect_with(options).await
    }

    async fn connect_with(options: MySqlConnectOptions) -> Result<Self, JobError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(defaults::DB_MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Database connection failed: {}", e);
                JobError::Persistence(PersistenceError::ConnectionFailed {
                    reason: e.to_string(),
                })
            })?;

        let database = Self { pool };
        database.initialize_tables().await?;
        info!("Database ready");
        Ok(database)
    }

    async fn initialize_tables(&self) -> Result<(), JobError> {
        // Two-column seen-fact set; no uniqueness constraint at the data
        // layer, novelty is enforced by check-then-insert.
        let fact_table_sql = r#"
            CREATE TABLE IF NOT EXISTS fact (
                id INT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
                fact TEXT NOT NULL,
                source VARCHAR(255) NOT NULL
            )
        "#;
        if let Err(e) = sqlx::query(fact_table_sql).execute(&self.pool).await {
            error!("Failed to create fact table: {}", e);
            return Err(e.into());
        }

        let runs_table_sql = r#"
            CREATE TABLE IF NOT EXISTS job_run (
                id CHAR(36) PRIMARY KEY,
                job_name VARCHAR(64) NOT NULL,
                status VARCHAR(16) NOT NULL,
                started_at DATETIME NOT NULL,
                completed_at DATETIME,
                error_message TEXT
            )
        "#;
        if let Err(e) = sqlx::query(runs_table_sql).execute(&self.pool).await {
            error!("Failed to create job_run table: {}", e);
            return Err(e.into());
        }

        Ok(())
    }
}
