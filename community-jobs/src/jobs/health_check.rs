//! Health-check job: probe the bot's health endpoint and raise an alert in
//! the alert channel when it is down.
//!
//! The job's outcome reflects whether the check ran, not whether the bot was
//! healthy: an unhealthy bot still exits zero, and so does a failed alert
//! delivery.

use reqwest::Client;
use tracing::{info, warn};

use crate::config::{Config, HealthSettings};
use crate::constants::http;
use crate::errors::JobError;
use crate::slack::SlackClient;

pub async fn run(config: &Config) -> Result<(), JobError> {
    let client = Client::builder()
        .timeout(http::REQUEST_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client for health check");
    let slack = SlackClient::new(config.slack.bot_token.clone());

    execute(&client, &slack, &config.health, &config.slack.alert_channel).await
}

pub async fn execute(
    client: &Client,
    slack: &SlackClient,
    settings: &HealthSettings,
    alert_channel: &str,
) -> Result<(), JobError> {
    let healthy = match client.get(&settings.url).send().await {
        Ok(response) if response.status().is_success() => true,
        Ok(response) => {
            warn!(
                "Health endpoint {} returned status {}",
                settings.url,
                response.status()
            );
            false
        }
        Err(e) => {
            warn!("Health endpoint {} unreachable: {}", settings.url, e);
            false
        }
    };

    if healthy {
        info!("Health check passed for {}", settings.url);
        return Ok(());
    }

    if let Err(e) = slack.post_text(alert_channel, &settings.alert_text).await {
        warn!("Failed to deliver health alert: {}", e);
    } else {
        info!("Health alert posted to {}", alert_channel);
    }

    Ok(())
}
