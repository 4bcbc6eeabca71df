//! Error types for the question-store crate.

use thiserror::Error;

/// Errors that can occur while loading, saving or mutating the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error occurred while reading or writing a snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot or import file is not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Referenced record doesn't exist (e.g. toggling a flag on an unknown question)
    #[error("{entity} with id {id} not found")]
    NotFound { entity: String, id: String },

    /// A field had a value outside its allowed range
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Snapshot integrity check failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl StoreError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
