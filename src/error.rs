// src/error.rs
use std::{io, path::PathBuf};
use thiserror::Error;

/// Why a downloaded payload was not accepted as an asset.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("payload of {size} bytes is below the {min} byte minimum")]
    TooSmall { size: usize, min: usize },
    #[error("payload of {size} bytes matches a known placeholder")]
    Placeholder { size: usize },
    #[error("payload is not a recognized image")]
    NotAnImage,
}

/// Recoverable failure of one network attempt. None of these abort a run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("no qualifying image on {url}")]
    NoCandidate { url: String },
    #[error("rejected {url}: {reason}")]
    Validation { url: String, reason: ValidationFailure },
    #[error("could not write asset: {0}")]
    Io(#[from] io::Error),
}

impl FetchError {
    pub fn transport(url: &str, reason: impl ToString) -> Self {
        FetchError::Transport { url: url.to_string(), reason: reason.to_string() }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed catalog {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("catalog {path} has no `{key}` list")]
    Shape { path: PathBuf, key: &'static str },
    #[error("cannot write catalog {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("malformed config {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}
