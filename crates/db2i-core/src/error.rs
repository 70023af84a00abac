//! Core error types for db2i-rs.
//!
//! [`AdapterError`] covers every failure the adapter can surface: bad
//! configuration, an unavailable driver, types the dialect cannot express,
//! operations the backend forbids, missing schema objects, and failures
//! reported by the connection while executing a statement.

use thiserror::Error;

/// The error type for all adapter operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    // ── Configuration / connectivity ─────────────────────────────────

    /// A required connection option is missing or inconsistent.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The driver is unavailable or the connection attempt failed.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    // ── Translation ──────────────────────────────────────────────────

    /// An abstract or dialect column type has no mapping.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// The requested operation is illegal for this backend or this column.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A referenced table, column, index, or foreign key does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    // ── Execution ────────────────────────────────────────────────────

    /// The connection failed to execute a statement.
    ///
    /// Connection implementations construct this variant; the adapter passes
    /// it through without interpretation.
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// A catalog row could not be decoded (missing column, wrong cell type).
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AdapterError {
    /// Returns a short, stable, machine-readable code for the error category.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationError(_) => "configuration",
            Self::ConnectionError(_) => "connection",
            Self::UnsupportedType(_) => "unsupported_type",
            Self::InvalidOperation(_) => "invalid_operation",
            Self::NotFound(_) => "not_found",
            Self::ExecutionError(_) => "execution",
            Self::DatabaseError(_) => "database",
        }
    }
}

/// A convenience type alias for `Result<T, AdapterError>`.
pub type AdapterResult<T> = Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AdapterError::ConfigurationError("x".into()).code(), "configuration");
        assert_eq!(AdapterError::ConnectionError("x".into()).code(), "connection");
        assert_eq!(AdapterError::UnsupportedType("x".into()).code(), "unsupported_type");
        assert_eq!(AdapterError::InvalidOperation("x".into()).code(), "invalid_operation");
        assert_eq!(AdapterError::NotFound("x".into()).code(), "not_found");
        assert_eq!(AdapterError::ExecutionError("x".into()).code(), "execution");
        assert_eq!(AdapterError::DatabaseError("x".into()).code(), "database");
    }

    #[test]
    fn test_error_display() {
        let err = AdapterError::NotFound("column EMAIL".into());
        assert_eq!(err.to_string(), "Not found: column EMAIL");

        let err = AdapterError::UnsupportedType("uuid".into());
        assert_eq!(err.to_string(), "Unsupported type: uuid");
    }
}
