use std::path::PathBuf;

use thiserror::Error;

/// Errors from the pure domain logic.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown prayer name: {0}")]
    UnknownPrayer(String),

    #[error("invalid clock time for {prayer}: \"{value}\"")]
    InvalidClock { prayer: String, value: String },

    #[error("invalid setting {field}: {reason}")]
    InvalidSetting { field: String, reason: String },

    #[error("unknown calculation method: {0}")]
    UnknownMethod(String),
}

/// Errors from loading environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors from the on-disk settings store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
