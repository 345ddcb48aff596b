//! Error types for gharama-checker

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No match found: {0}")]
    LookupNotFound(String),

    #[error("CRSP file format error: {0}")]
    CrspFormat(String),

    #[error("Scrape failed: {0}")]
    Scrape(String),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
