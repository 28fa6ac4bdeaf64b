//! Validation errors raised at the boundary of each analytics operation

use thiserror::Error;

/// Errors that can occur in strata operations
///
/// Every variant describes malformed caller input. Nothing here is fatal:
/// the caller can clean the input and invoke the operation again.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Embedding dimension mismatch at observation {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Non-finite value for {field}: {value}")]
    NonFinite { field: String, value: f64 },

    #[error("Similarity threshold must be finite, got {0}")]
    InvalidThreshold(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for strata operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Reject NaN and infinities for a named numeric field.
pub(crate) fn ensure_finite(field: &str, value: f64) -> AnalysisResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::NonFinite {
            field: field.to_string(),
            value,
        })
    }
}
