//! Channel-prune job: archive channels with no recent activity.
//!
//! A Slack API failure for one channel is logged and the loop moves on; the
//! row is flagged only after the API confirmed the deletion, so a failed
//! channel is retried on the next run.

use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::database::{Database, JobRunRecord};
use crate::errors::JobError;
use crate::slack::SlackClient;

const JOB_NAME: &str = "channel-prune";

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
    let stale = database
        .stale_channels(config.channel_prune.stale_after_days)
        .await?;

    if stale.is_empty() {
        info!("No stale channels to prune");
        return Ok(());
    }

    info!(
        "Pruning {} channels idle for {} days",
        stale.len(),
        config.channel_prune.stale_after_days
    );

    let mut pruned = 0usize;
    for channel in &stale {
        match slack.delete_channel(&channel.channel_id).await {
            Ok(()) => {
                database.mark_channel_deleted(&channel.channel_id).await?;
                pruned += 1;
                info!("Pruned #{} ({})", channel.name, channel.channel_id);
            }
            Err(e) => {
                warn!(
                    "Unable to delete #{} ({}): {}",
                    channel.name, channel.channel_id, e
                );
            }
        }
    }

    info!("Pruned {}/{} stale channels", pruned, stale.len());
    Ok(())
}
