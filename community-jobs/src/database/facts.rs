//! Seen-fact persistence (the fun-fact novelty set).

use async_trait::async_trait;
use tracing::debug;

use super::{Database, FactStore};
use crate::errors::JobError;

#[async_trait]
impl FactStore for Database {
    async fn fact_exists(&self, text: &str, source: &str) -> Result<bool, JobError> {
        let row = sqlx::query("SELECT 1 FROM fact WHERE fact = ? AND source = ? LIMIT 1")
            .bind(text)
            .bind(source)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn insert_fact(&self, text: &str, source: &str) -> Result<(), JobError> {
        sqlx::query("INSERT INTO fact (fact, source) VALUES (?, ?)")
            .bind(text)
            .bind(source)
            .execute(&self.pool)
            .await?;

        debug!("Recorded fact from {}", source);
        Ok(())
    }
}
