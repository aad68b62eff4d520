//! Core error types for classmate-core.
//!
//! Validation errors abort an operation. Store and notification errors are
//! reported back to the caller alongside a successful in-memory mutation, so
//! they never unwind a user action.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for classmate-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Local store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Notification scheduler errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a [`LocalStore`](crate::storage::LocalStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// A collection could not be serialized
    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors raised by a [`Scheduler`](crate::notify::Scheduler).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The user has not granted notification permission
    #[error("Notification permission not granted")]
    PermissionDenied,

    /// The scheduler backend failed
    #[error("Scheduler unavailable: {0}")]
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors raised when creating a subject or task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// Time of day not in HH:MM form
    #[error("Invalid time '{0}': expected HH:MM (24-hour)")]
    InvalidTime(String),

    /// Date not in YYYY-MM-DD form
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Weekday not in Monday..Saturday
    #[error("Invalid weekday '{0}': expected one of Monday..Saturday")]
    InvalidWeekday(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
