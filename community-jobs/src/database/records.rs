//! Database record types (entities).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit row written at the end of a database-backed job run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRunRecord {
    pub id: String,
    pub job_name: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl JobRunRecord {
    pub fn completed(job_name: &str, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job_name: job_name.to_string(),
            status: "completed".to_string(),
            started_at,
            completed_at: Some(Utc::now()),
            error_message: None,
        }
    }

    pub fn failed(job_name: &str, started_at: DateTime<Utc>, error: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            job_name: job_name.to_string(),
            status: "failed".to_string(),
            started_at,
            completed_at: Some(Utc::now()),
            error_message: Some(error),
        }
    }
}

/// Channel with no recorded activity inside the stale window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaleChannel {
    pub channel_id: String,
    pub name: String,
}

/// One saved list item joined with its requestor's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
    pub requestor_name: String,
}
