use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("word list {} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read word list {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a word could not be defined. Always a soft, per-word failure.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("invalid lookup URL for '{0}'")]
    InvalidUrl(String),

    #[error("no definition found for '{0}'")]
    NoDefinition(String),
}

/// Why pronunciation audio could not be used. The word itself still succeeds.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("audio file too small or empty ({bytes} bytes)")]
    TooSmall { bytes: usize },
}
