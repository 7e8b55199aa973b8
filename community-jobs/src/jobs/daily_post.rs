//! Daily-post job: pick one random saved list item and post it.

use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::database::{Database, JobRunRecord};
use crate::errors::{JobError, PersistenceError};
use crate::slack::blocks::build_daily_post_message;
use crate::slack::SlackClient;

const JOB_NAME: &str = "daily-post";

pub async fn run(config: &Config) -> Result<(), JobError> {
    let database = Database::connect(&config.database).await?;
    let slack = SlackClient::new(config.slack.bot_token.clone());

    let started_at = Utc::now();
    let result = execute(&database, &slack, config).await;

    let record = match &result {
        Ok(()) => JobRunRecord::completed(JOB_NAME, started_at),
        Err(e) => JobRunRecord::failed(JOB_NAME, started_at, e.to_string()),
    };
    if let Err(e) = database.record_job_run(&record).await {
        warn!("Failed to record job run: {}", e);
    }

    result
}

async fn execute(database: &Database, slack: &SlackClient, config: &Config) -> Result<(), JobError> {
    let item = database
        .random_list_item(&config.daily_post.list_channel_id)
        .await?
        .ok_or_else(|| PersistenceError::NoRows {
            what: "list items".to_string(),
        })?;

    info!("Selected list item requested by {}", item.requestor_name);

    let message = build_daily_post_message(&item);
    if let Err(e) = slack.post_message(&config.slack.daily_channel, &message).await {
        warn!("Failed to deliver daily post: {}", e);
    }

    Ok(())
}
