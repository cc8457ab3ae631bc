//! Error types for the body builder

use thiserror::Error;

/// Body builder errors.
///
/// Most setters are deliberately permissive and trust the search service to
/// reject malformed option values at request time. The only locally
/// validated input is the ordering direction.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for body builder operations
pub type Result<T> = std::result::Result<T, Error>;
