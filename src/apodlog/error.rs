use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApodError {
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Missing file: '{}'. Run `apodlog init` to create it.", .0.display())]
    StoreMissing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request error: Verify your API key and try again. (HTTP {0})")]
    Unauthorized(u16),

    #[error("NASA API error: Please try again later. (HTTP {0})")]
    Unavailable(u16),

    #[error("Unexpected response from the APOD API: HTTP {0}")]
    UnexpectedStatus(u16),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, ApodError>;
