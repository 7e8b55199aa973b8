//! Job run audit rows.

use tracing::debug;

use super::records::JobRunRecord;
use super::Database;
use crate::errors::JobError;

impl Database {
    pub async fn record_job_run(&self, record: &JobRunRecord) -> Result<(), JobError> {
        sqlx::query(
            r#"
            INSERT INTO job_run (id, job_name, status, started_at, completed_at, error_message)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.job_name)
        .bind(&record.status)
        .bind(record.started_at)
        .bind(record.completed_at)
        .bind(&record.error_message)
        .execute(&self.pool)
        .await?;

        debug!("Recorded {} run {}", record.job_name, record.id);
        Ok(())
    }
}
