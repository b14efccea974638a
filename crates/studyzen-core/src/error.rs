//! Core error types for studyzen-core.
//!
//! This module defines the error hierarchy using thiserror. Lookup misses
//! are deliberately not errors: operations on an unknown session or user
//! return `Option`/empty results instead (the ledger's leniency policy).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyzen-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Account-related errors
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not create or resolve the data directory
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// Failed to open the store file
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A persisted collection could not be decoded
    #[error("Corrupt collection '{key}': {source}")]
    CorruptCollection {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be encoded for writing
    #[error("Failed to encode collection '{key}': {source}")]
    EncodeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Store is locked by another connection
    #[error("Store is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
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

/// Account-specific errors.
#[derive(Error, Debug)]
pub enum AccountError {
    /// Username is already registered
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    /// A registration field failed validation
    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// Underlying storage failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
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
