// crates/districts-core/src/error.rs
use thiserror::Error;

/// Errors raised while loading or parsing district data.
///
/// None of these reach the person using the map: the session logs them and
/// keeps whatever state it already had.
#[derive(Debug, Error)]
pub enum DistrictError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, DistrictError>;
