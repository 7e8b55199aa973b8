//! Job entry points, one module per scheduled job.
//!
//! Every job is a linear run-to-completion sequence with no coordination
//! between invocations. Configuration, fetch, and database errors abort a
//! run with a non-zero exit; delivery failures are logged and the run still
//! counts as successful.

pub mod channel_prune;
pub mod daily_post;
pub mod fun_fact;
pub mod health_check;
pub mod history_export;

use crate::config::Config;
use crate::errors::{ConfigError, JobError};

pub const JOB_NAMES: &[&str] = &[
    "fun-fact",
    "daily-post",
    "channel-prune",
    "health-check",
    "history-export",
];

pub async fn run(name: &str, config: &Config) -> Result<(), JobError> {
    match name {
        "fun-fact" => fun_fact::run(config).await,
        "daily-post" => daily_post::run(config).await,
        "channel-prune" => channel_prune::run(config).await,
        "health-check" => health_check::run(config).await,
        "history-export" => history_export::run(config),
        other => Err(ConfigError::InvalidValue {
            field: "job".to_string(),
            reason: format!("unknown job '{}' (expected one of: {})", other, JOB_NAMES.join(", ")),
        }
        .into()),
    }
}
