//! Error types for tidylinks operations.
//!
//! Prettifying and detecting never fail; only the edges that touch files,
//! settings or selector strings return these.

use thiserror::Error;

/// Errors that can occur while loading settings or processing documents.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
