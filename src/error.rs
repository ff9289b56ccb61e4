//! Error types for todos.
//!
//! The HTTP rendering of these errors lives in `http::response`: not-found
//! (including ownership mismatches) keeps its 404 shape, validation and
//! malformed ids are 400s, and store failures surface as 500 on reads and
//! 400 on writes.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for todos operations
#[derive(Error, Debug)]
pub enum Error {
    /// Missing record or ownership mismatch; deliberately the same shape
    #[error("Todo not found")]
    NotFound,

    #[error("Validation error")]
    Validation(Vec<String>),

    #[error("Invalid todo ID format")]
    InvalidId(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for todos operations
pub type Result<T> = std::result::Result<T, Error>;
