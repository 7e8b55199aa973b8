//! Error types for the scheduled jobs.
//!
//! The taxonomy matches how failures are actually handled: configuration
//! errors abort before any I/O, source-fetch and persistence errors abort
//! the run, delivery errors are caught and logged at the call site.

use std::fmt;

/// Top-level error for a job run
#[derive(Debug)]
pub enum JobError {
    /// Missing or invalid configuration (fatal at startup)
    Config(ConfigError),

    /// External source failures (fatal for the whole run)
    SourceFetch(SourceFetchError),

    /// Database failures (fatal for the run)
    Persistence(PersistenceError),

    /// Slack delivery failures (callers catch and log these)
    Delivery(DeliveryError),

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Required environment variable is unset or empty
    MissingEnv { name: String },

    /// Failed to read the job configuration file
    LoadFailed { path: String, reason: String },

    /// Configuration file did not parse
    ParseError { reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

/// External fetch error variants
#[derive(Debug)]
pub enum SourceFetchError {
    /// Request could not be sent or the connection failed
    RequestFailed { url: String, reason: String },

    /// Request timed out
    Timeout { url: String },

    /// Endpoint returned a non-success status
    Status { url: String, status: u16 },

    /// Response body was not the expected shape
    MalformedResponse { url: String, reason: String },

    /// The attempt bound was reached before the quota was met
    AttemptsExhausted { attempts: u32, collected: usize },
}

/// Database error variants
#[derive(Debug)]
pub enum PersistenceError {
    /// Connection failed
    ConnectionFailed { reason: String },

    /// Query execution failed
    QueryFailed { reason: String },

    /// A query that must return data returned nothing
    NoRows { what: String },
}

/// Slack delivery error variants
#[derive(Debug)]
pub enum DeliveryError {
    /// Request could not be sent or timed out
    RequestFailed { reason: String },

    /// Slack returned a non-success HTTP status
    Status { status: u16 },

    /// Slack accepted the request but reported an API error
    Api { error: String },
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::Config(e) => write!(f, "Configuration error: {}", e),
            JobError::SourceFetch(e) => write!(f, "Source fetch error: {}", e),
            JobError::Persistence(e) => write!(f, "Database error: {}", e),
            JobError::Delivery(e) => write!(f, "Delivery error: {}", e),
            JobError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingEnv { name } => {
                write!(f, "Required environment variable '{}' is not set", name)
            }
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for SourceFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFetchError::RequestFailed { url, reason } => {
                write!(f, "Request to {} failed: {}", url, reason)
            }
            SourceFetchError::Timeout { url } => {
                write!(f, "Request to {} timed out", url)
            }
            SourceFetchError::Status { url, status } => {
                write!(f, "{} returned status {}", url, status)
            }
            SourceFetchError::MalformedResponse { url, reason } => {
                write!(f, "Malformed response from {}: {}", url, reason)
            }
            SourceFetchError::AttemptsExhausted { attempts, collected } => {
                write!(
                    f,
                    "Gave up after {} fetch attempts with {} novel facts collected",
                    attempts, collected
                )
            }
        }
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::ConnectionFailed { reason } => {
                write!(f, "Database connection failed: {}", reason)
            }
            PersistenceError::QueryFailed { reason } => {
                write!(f, "Query failed: {}", reason)
            }
            PersistenceError::NoRows { what } => {
                write!(f, "No {} found", what)
            }
        }
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::RequestFailed { reason } => {
                write!(f, "Slack request failed: {}", reason)
            }
            DeliveryError::Status { status } => {
                write!(f, "Slack returned status {}", status)
            }
            DeliveryError::Api { error } => {
                write!(f, "Slack API error: {}", error)
            }
        }
    }
}

impl std::error::Error for JobError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for SourceFetchError {}
impl std::error::Error for PersistenceError {}
impl std::error::Error for DeliveryError {}

impl From<ConfigError> for JobError {
    fn from(err: ConfigError) -> Self {
        JobError::Config(err)
    }
}

impl From<SourceFetchError> for JobError {
    fn from(err: SourceFetchError) -> Self {
        JobError::SourceFetch(err)
    }
}

impl From<PersistenceError> for JobError {
    fn from(err: PersistenceError) -> Self {
        JobError::Persistence(err)
    }
}

impl From<DeliveryError> for JobError {
    fn from(err: DeliveryError) -> Self {
        JobError::Delivery(err)
    }
}

impl From<sqlx::Error> for JobError {
    fn from(err: sqlx::Error) -> Self {
        JobError::Persistence(PersistenceError::QueryFailed {
            reason: err.to_string(),
        })
    }
}
