//! Error handler for mailapps.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Enum representing every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid url character at byte {position}")]
    InvalidCharacter { position: usize },

    #[error("unknown email app `{0}`")]
    UnknownProvider(String),

    #[error("{provider} cannot compose this message")]
    Unavailable { provider: &'static str },

    #[error("cannot open configuration file {path:?}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("serialization failed")]
    Json(#[from] serde_json::Error),
}
