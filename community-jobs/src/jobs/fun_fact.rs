//! Fun-fact job: collect a batch of novel facts and post them, with the
//! optional quote / trends / on-this-day sections when configured.

use chrono::Utc;
use tracing::{info, warn};

use crate::collector::FactCollector;
use crate::config::{Config, FunFactSettings};
use crate::database::{Database, FactStore, JobRunRecord};
use crate::errors::JobError;
use crate::slack::blocks::build_fun_fact_message;
use crate::slack::SlackClient;
use crate::sources::extras::{OnThisDayEvent, Quote, Trend};
use crate::sources::SourceClient;

const JOB_NAME: &str = "fun-fact";

pub async fn run(config: &Config) -> Result<(), JobError> {
    let database = Database::connect(&config.database).await?;
    let slack = SlackClient::new(config.slack.bot_token.clone());
    let client = SourceClient::new();

    let started_at = Utc::now();
    let result = execute(
        &client,
        &database,
        &slack,
        &config.fun_fact,
        &config.slack.facts_channel,
    )
    .await;

    let record = match &result {
        Ok(()) => JobRunRecord::completed(JOB_NAME, started_at),
        Err(e) => JobRunRecord::failed(JOB_NAME, started_at, e.to_string()),
    };
    if let Err(e) = database.record_job_run(&record).await {
        warn!("Failed to record job run: {}", e);
    }

    result
}

/// Collect, enrich, render, deliver. Split from [`run`] so tests can inject
/// a fact store and mock endpoints.
pub async fn execute<S: FactStore + ?Sized>(
    client: &SourceClient,
    store: &S,
    slack: &SlackClient,
    settings: &FunFactSettings,
    channel: &str,
) -> Result<(), JobError> {
    let collector = FactCollector::new(client, store, &settings.sources, settings.max_attempts);
    let batch = collector.collect_batch(settings.quota).await?;

    let quote = fetch_quote(client, settings).await;
    let trends = fetch_trends(client, settings).await;
    let on_this_day = fetch_on_this_day(client, settings).await;

    let message = build_fun_fact_message(
        &batch,
        quote.as_ref(),
        trends.as_deref(),
        on_this_day.as_deref(),
    );

    if let Err(e) = slack.post_message(channel, &message).await {
        warn!("Failed to deliver fun-fact message: {}", e);
    } else {
        info!("Posted {} facts to {}", batch.len(), channel);
    }

    Ok(())
}

async fn fetch_quote(client: &SourceClient, settings: &FunFactSettings) -> Option<Quote> {
    let quote_settings = settings.quote.as_ref()?;
    match client.fetch_quote(quote_settings).await {
        Ok(quote) => Some(quote),
        Err(e) => {
            warn!("Quote of the day unavailable: {}", e);
            None
        }
    }
}

async fn fetch_trends(client: &SourceClient, settings: &FunFactSettings) -> Option<Vec<Trend>> {
    let trends_settings = settings.trends.as_ref()?;
    match client.fetch_trends(trends_settings).await {
        Ok(trends) => Some(trends),
        Err(e) => {
            warn!("Trending topics unavailable: {}", e);
            None
        }
    }
}

async fn fetch_on_this_day(
    client: &SourceClient,
    settings: &FunFactSettings,
) -> Option<Vec<OnThisDayEvent>> {
    let otd_settings = settings.on_this_day.as_ref()?;
    match client
        .fetch_on_this_day(otd_settings, Utc::now().date_naive())
        .await
    {
        Ok(events) => Some(events),
        Err(e) => {
            warn!("On-this-day feed unavailable: {}", e);
            None
        }
    }
}
