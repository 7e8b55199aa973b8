//! Job configuration.
//!
//! The static part (source list, channels, per-job settings) lives in a TOML
//! file; secrets (database credentials, the bot token, per-source API keys)
//! are resolved from the environment exactly once, in [`Config::load`]. The
//! result is an explicit struct passed by parameter to every component, so
//! a missing value fails the run at startup rather than mid-job.
//!
//! Source entries reference their API keys by environment variable name
//! (`api_key_env`) rather than holding the key itself, keeping the config
//! file safe to commit.

use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::constants::{channels, collector, defaults};
use crate::errors::{ConfigError, JobError};

/// Fully resolved configuration, secrets included.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub slack: SlackSettings,
    pub fun_fact: FunFactSettings,
    pub daily_post: DailyPostSettings,
    pub channel_prune: ChannelPruneSettings,
    pub health: HealthSettings,
    pub history_export: HistoryExportSettings,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct SlackSettings {
    pub bot_token: String,
    pub facts_channel: String,
    pub daily_channel: String,
    pub alert_channel: String,
}

/// One external fact source: plain GET, or keyed-header GET when `header`
/// is present.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub url: String,
    /// JSON field holding the fact text in this source's responses
    pub field_name: String,
    pub header: Option<HeaderAuth>,
}

#[derive(Debug, Clone)]
pub struct HeaderAuth {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct FunFactSettings {
    pub sources: Vec<SourceConfig>,
    pub quota: u32,
    /// Safety valve: total fetch attempts allowed before the run is aborted
    pub max_attempts: u32,
    pub quote: Option<QuoteSettings>,
    pub trends: Option<TrendsSettings>,
    pub on_this_day: Option<OnThisDaySettings>,
}

#[derive(Debug, Clone)]
pub struct QuoteSettings {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct TrendsSettings {
    pub url: String,
    pub bearer_token: String,
}

#[derive(Debug, Clone)]
pub struct OnThisDaySettings {
    /// URL with `{month}` and `{day}` placeholders, zero-padded on expansion
    pub url_template: String,
}

#[derive(Debug, Clone)]
pub struct DailyPostSettings {
    pub list_channel_id: String,
}

#[derive(Debug, Clone)]
pub struct ChannelPruneSettings {
    pub stale_after_days: u32,
}

#[derive(Debug, Clone)]
pub struct HealthSettings {
    pub url: String,
    pub alert_text: String,
}

#[derive(Debug, Clone)]
pub struct HistoryExportSettings {
    pub data_dir: String,
    pub output_path: String,
}

// ============================================================================
// File-format structs (what jobs.toml deserializes into, before secrets
// are resolved)
// ============================================================================

#[derive(Debug, Deserialize)]
struct JobsFile {
    #[serde(default)]
    sources: Vec<SourceEntry>,
    slack: SlackEntry,
    #[serde(default)]
    fun_fact: FunFactEntry,
    quote: Option<QuoteEntry>,
    trends: Option<TrendsEntry>,
    on_this_day: Option<OnThisDayEntry>,
    daily_post: DailyPostEntry,
    channel_prune: Option<ChannelPruneEntry>,
    health: HealthEntry,
    history_export: HistoryExportEntry,
}

#[derive(Debug, Deserialize)]
struct SourceEntry {
    url: String,
    field_name: String,
    api_key_header: Option<String>,
    api_key_env: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SlackEntry {
    facts_channel: String,
    daily_channel: String,
    alert_channel: String,
}

#[derive(Debug, Deserialize, Default)]
struct FunFactEntry {
    quota: Option<u32>,
    max_attempts: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct QuoteEntry {
    url: String,
}

#[derive(Debug, Deserialize)]
struct TrendsEntry {
    url: String,
    bearer_env: String,
}

#[derive(Debug, Deserialize)]
struct OnThisDayEntry {
    url_template: String,
}

#[derive(Debug, Deserialize)]
struct DailyPostEntry {
    list_channel_id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelPruneEntry {
    stale_after_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct HealthEntry {
    url: String,
    alert_text: String,
}

#[derive(Debug, Deserialize)]
struct HistoryExportEntry {
    data_dir: String,
    output_path: String,
}

impl Config {
    /// Load from the path in `JOBS_CONFIG` (default `config/jobs.toml`) and
    /// resolve every secret from the environment.
    pub fn load() -> Result<Self, JobError> {
        let path = std::env::var("JOBS_CONFIG").unwrap_or_else(|_| defaults::CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self, JobError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let file: JobsFile = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            reason: e.to_string(),
        })?;

        let config = Self::resolve(file)?;
        info!(
            "Configuration loaded from {}: {} fact sources, quota {}",
            path.display(),
            config.fun_fact.sources.len(),
            config.fun_fact.quota
        );
        Ok(config)
    }

    fn resolve(file: JobsFile) -> Result<Self, JobError> {
        let database = DatabaseConfig {
            host: require_env("DB_HOST")?,
            user: require_env("DB_USER")?,
            password: require_env("DB_PASSWORD")?,
            database: require_env("DB_NAME")?,
        };

        let slack = SlackSettings {
            bot_token: require_env("SLACK_BOT_TOKEN")?,
            facts_channel: file.slack.facts_channel,
            daily_channel: file.slack.daily_channel,
            alert_channel: file.slack.alert_channel,
        };

        if file.sources.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "sources".to_string(),
                reason: "at least one fact source is required".to_string(),
            }
            .into());
        }

        let mut sources = Vec::with_capacity(file.sources.len());
        for entry in file.sources {
            let header = match (entry.api_key_header, entry.api_key_env) {
                (Some(name), Some(env_name)) => Some(HeaderAuth {
                    name,
                    value: require_env(&env_name)?,
                }),
                (None, None) => None,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "sources".to_string(),
                        reason: format!(
                            "source '{}' must set api_key_header and api_key_env together",
                            entry.url
                        ),
                    }
                    .into());
                }
            };
            sources.push(SourceConfig {
                url: entry.url,
                field_name: entry.field_name,
                header,
            });
        }

        let quota = file.fun_fact.quota.unwrap_or(collector::DEFAULT_QUOTA);
        if quota == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fun_fact.quota".to_string(),
                reason: "quota must be positive".to_string(),
            }
            .into());
        }
        let max_attempts = file
            .fun_fact
            .max_attempts
            .unwrap_or(quota * collector::ATTEMPTS_PER_QUOTA);

        let trends = match file.trends {
            Some(entry) => Some(TrendsSettings {
                url: entry.url,
                bearer_token: require_env(&entry.bearer_env)?,
            }),
            None => None,
        };

        Ok(Config {
            database,
            slack,
            fun_fact: FunFactSettings {
                sources,
                quota,
                max_attempts,
                quote: file.quote.map(|q| QuoteSettings { url: q.url }),
                trends,
                on_this_day: file.on_this_day.map(|o| OnThisDaySettings {
                    url_template: o.url_template,
                }),
            },
            daily_post: DailyPostSettings {
                list_channel_id: file.daily_post.list_channel_id,
            },
            channel_prune: ChannelPruneSettings {
                stale_after_days: file
                    .channel_prune
                    .and_then(|c| c.stale_after_days)
                    .unwrap_or(channels::DEFAULT_STALE_AFTER_DAYS),
            },
            health: HealthSettings {
                url: file.health.url,
                alert_text: file.health.alert_text,
            },
            history_export: HistoryExportSettings {
                data_dir: file.history_export.data_dir,
                output_path: file.history_export.output_path,
            },
        })
    }
}

/// Environment lookup that treats empty values the same as unset ones.
fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::MissingEnv {
            name: name.to_string(),
        })
}
