//! Error types for chart providers, interpreters and configuration loading.
//!
//! None of these escape the public entry points: provider errors are logged and the
//! caller degrades to deterministic output.

use thiserror::Error;

/// Result type alias for remote provider attempts
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised by a single chart provider or interpreter attempt
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("provider returned no usable content")]
    EmptyResponse,
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

/// Result type alias for configuration and credential store operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading settings or reading/writing the credential file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("credential file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("credential file encode error: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
