use thiserror::Error;

use crate::metrics::MetricKind;

/// Main error type for the TunePilot system
#[derive(Error, Debug)]
pub enum TpError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Result error: {0}")]
    Result(#[from] ResultError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Model-configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config resource not found at {path}: {message}")]
    ResourceNotFound { path: String, message: String },

    #[error("Malformed config text: {message}")]
    MalformedText { message: String },

    #[error("Field '{field}' not found in model config at {path}")]
    FieldMissing { field: String, path: String },
}

/// Result-ranking errors
#[derive(Error, Debug)]
pub enum ResultError {
    #[error("Category unknown for objective: {kind}")]
    UnknownMetricCategory { kind: MetricKind },

    #[error("Result state not initialized: {message}")]
    UninitializedResultState { message: String },

    #[error("Table with key '{key}' not found")]
    UnknownTableKey { key: String },
}

/// Result type alias for TunePilot operations
pub type TpResult<T> = Result<T, TpError>;
