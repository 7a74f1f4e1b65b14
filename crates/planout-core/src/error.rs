//! Error types for the planner library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Chunk not found for the given ID (or not owned by the given plan)
    #[error("Chunk with ID {id} not found")]
    ChunkNotFound { id: u64 },
    /// Status value outside the five recognized chunk statuses
    #[error("Invalid status: {value}. Must be one of TODO, IN_PROGRESS, DONE, SKIPPED, DEFERRED")]
    InvalidStatus { value: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of a [`PlannerError`], used by outer layers to pick
/// a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced plan or chunk does not exist.
    NotFound,
    /// The caller supplied a value the core rejects.
    BadRequest,
    /// Anything else: storage, filesystem, configuration.
    Internal,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::database(message).with_source(source)
    }

    /// Wraps a blocking-task join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// Classifies the error for status-code mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PlanNotFound { .. } | Self::ChunkNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidStatus { .. } | Self::InvalidInput { .. } => ErrorKind::BadRequest,
            Self::Database { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Serialization { .. }
            | Self::Configuration { .. } => ErrorKind::Internal,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_classification() {
        assert_eq!(PlannerError::PlanNotFound { id: 1 }.kind(), ErrorKind::NotFound);
        assert_eq!(PlannerError::ChunkNotFound { id: 2 }.kind(), ErrorKind::NotFound);
        assert_eq!(
            PlannerError::InvalidStatus {
                value: "NOPE".into()
            }
            .kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            PlannerError::invalid_input("title")
                .with_reason("must not be empty")
                .kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            PlannerError::Configuration {
                message: "boom".into()
            }
            .kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_invalid_status_message_lists_variants() {
        let err = PlannerError::InvalidStatus {
            value: "FINISHED".into(),
        };
        let message = err.to_string();
        assert!(message.contains("FINISHED"));
        assert!(message.contains("IN_PROGRESS"));
    }
}
