//! Core error types for deepwork-core.
//!
//! This module defines the error hierarchy using thiserror. Validation and
//! transition errors never mutate session state; the NotFound condition is
//! surfaced by the storage layer, never by the lifecycle engine itself.

use std::path::PathBuf;
use thiserror::Error;

use crate::session::SessionStatus;

/// Core error type for deepwork-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed input (title/reason length, duration range)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Operation attempted from a status that does not permit it
    #[error("{0}")]
    Transition(#[from] InvalidTransition),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Validation errors for session input fields.
///
/// Always recoverable by the caller correcting input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title outside the 1-200 character range
    #[error("title must be between 1 and 200 characters (got {len})")]
    TitleLength { len: usize },

    /// Scheduled duration outside the 1-480 minute range
    #[error("scheduled duration must be between 1 and 480 minutes (got {minutes})")]
    DurationRange { minutes: u32 },

    /// Pause reason outside the 1-500 character range
    #[error("pause reason must be between 1 and 500 characters (got {len})")]
    ReasonLength { len: usize },
}

/// A lifecycle operation was attempted from a status that does not permit it.
///
/// The session is left unchanged. The caller recovers by re-querying the
/// current status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot {operation} session in '{from}' state")]
pub struct InvalidTransition {
    /// The attempted operation ("start", "pause", "resume", "complete")
    pub operation: &'static str,
    /// The status the session was in when the operation was rejected
    pub from: SessionStatus,
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to create the data directory
    #[error("Failed to create data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Referenced session identifier is unknown
    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
