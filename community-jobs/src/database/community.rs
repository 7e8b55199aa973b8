//! Queries against the bot-owned community tables.
//!
//! Column names (`channelId`, `createdAt`, ...) follow the bot's schema,
//! which these jobs read but do not own.

use sqlx::Row;
use tracing::debug;

use super::records::{ListItem, StaleChannel};
use super::Database;
use crate::errors::JobError;

impl Database {
    /// Channels with no activity rows inside the stale window and not yet
    /// flagged deleted.
    pub async fn stale_channels(&self, stale_after_days: u32) -> Result<Vec<StaleChannel>, JobError> {
        debug!("Querying channels idle for {} days", stale_after_days);

        let rows = sqlx::query(
            r#"
            SELECT channelId, name
            FROM slack_channel
            WHERE channelId NOT IN (
                SELECT DISTINCT activity.channel
                FROM activity
                WHERE activity.createdAt BETWEEN NOW() - INTERVAL ? DAY AND NOW()
            )
            AND slack_channel.isDeleted = 0
            "#,
        )
        .bind(stale_after_days)
        .fetch_all(&self.pool)
        .await?;

        let mut channels = Vec::with_capacity(rows.len());
        for row in rows {
            channels.push(StaleChannel {
                channel_id: row.try_get("channelId")?,
                name: row.try_get("name")?,
            });
        }
        Ok(channels)
    }

    /// Flag a pruned channel. Only called after the Slack API confirmed the
    /// deletion.
    pub async fn mark_channel_deleted(&self, channel_id: &str) -> Result<(), JobError> {
        sqlx::query("UPDATE slack_channel SET isDeleted = 1 WHERE channelId = ?")
            .bind(channel_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// One uniformly random saved list item for the given channel, joined
    /// with the requestor's display name. `None` when the list is empty.
    pub async fn random_list_item(&self, channel_id: &str) -> Result<Option<ListItem>, JobError> {
        let row = sqlx::query(
            r#"
            SELECT l.text, u.name AS requestor_name
            FROM list AS l
            INNER JOIN slack_user AS u ON u.slackId = l.requestorId
            WHERE l.channelId = ?
            ORDER BY RAND()
            LIMIT 1
            "#,
        )
        .bind(channel_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(ListItem {
                text: row.try_get("text")?,
                requestor_name: row.try_get("requestor_name")?,
            })),
            None => Ok(None),
        }
    }
}
