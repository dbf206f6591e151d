//! Error type shared by storage, services, reports and export
//!
//! Metric computations never fail on their own; errors come from reading
//! and writing records and from business rules on the project lifecycle.

use thiserror::Error;

/// The main error type for flip-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Settings could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A record or argument failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Project is closed and cannot take new expenses or sales
    #[error("Project is closed: {0}")]
    Locked(String),

    /// Entity is still referenced by other records
    #[error("{entity_type} '{identifier}' is in use by {count} expense(s)")]
    InUse {
        entity_type: &'static str,
        identifier: String,
        count: usize,
    },

    /// JSON document or lock failures in the record store
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    /// Create a "not found" error for projects
    pub fn project_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Project",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for flip-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::project_not_found("Casa Norte");
        assert_eq!(err.to_string(), "Project not found: Casa Norte");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_in_use_error() {
        let err = LedgerError::InUse {
            entity_type: "Category",
            identifier: "Materials".into(),
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Category 'Materials' is in use by 3 expense(s)"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
