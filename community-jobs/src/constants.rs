//! Application-wide constants for timeouts, limits, and default values
//!
//! Single source of truth for the magic numbers used across the jobs,
//! organized by category.

use std::time::Duration;

/// HTTP client timeout constants
pub mod http {
    use super::Duration;

    /// Timeout for requests to fact/quote/trend sources
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Timeout for Slack API requests
    pub const SLACK_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Fact collector constants
pub mod collector {
    /// Number of novel facts required per run
    pub const DEFAULT_QUOTA: u32 = 5;

    /// Fetch attempts allowed per requested fact before the run is aborted
    pub const ATTEMPTS_PER_QUOTA: u32 = 20;
}

/// Optional message-section constants
pub mod extras {
    /// Trends / on-this-day entries rendered per message
    pub const ITEM_LIMIT: usize = 5;
}

/// Channel pruning constants
pub mod channels {
    /// Days without activity before a channel is considered stale
    pub const DEFAULT_STALE_AFTER_DAYS: u32 = 90;
}

/// Default configuration values
pub mod defaults {
    /// Job configuration file, relative to the working directory
    pub const CONFIG_PATH: &str = "config/jobs.toml";

    /// Slack Web API base URL
    pub const SLACK_API_BASE: &str = "https://slack.com/api";

    /// Connection pool size; jobs are sequential so a small pool is enough
    pub const DB_MAX_CONNECTIONS: u32 = 2;
}
