//! Error types for curlpad
//!
//! The engine itself never fails; these errors cover the edges around it
//! (configuration, environment files, CLI input and output).

use thiserror::Error;

/// Main error type for curlpad
#[derive(Error, Debug)]
pub enum CurlpadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

pub type Result<T> = std::result::Result<T, CurlpadError>;
