//! Index adapter error types.
//!
//! This module defines the unified error type for all index adapter operations,
//! including both low-level backend errors and high-level validation errors.

use std::fmt;

use thiserror::Error;

/// Underlying cause of a rejected index creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationFailure {
    /// The request never got a response (transport or connection failure).
    Network,
    /// The backend rejected the settings or mappings.
    Validation,
    /// An index with the same name already exists.
    Conflict,
    Unknown,
}

impl fmt::Display for CreationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CreationFailure::Network => "network",
            CreationFailure::Validation => "validation",
            CreationFailure::Conflict => "conflict",
            CreationFailure::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Unified errors from index adapter operations.
///
/// Used by the `IndexProvider` trait and `IndexAdapter` for all operations.
/// Collaborator failures on document writes are surfaced unchanged; nothing
/// is retried.
#[derive(Debug, Clone, Error)]
pub enum IndexAdapterError {
    /// Validation error (e.g., empty index name, dataset without columns).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to establish connection to the search backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The backend denied the request (401/403).
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// Failed to create an index.
    #[error("Index creation error ({cause}): {message}")]
    IndexCreationError {
        cause: CreationFailure,
        message: String,
    },

    /// An id field is missing from a row.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Bulk request failed as a whole.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to delete an index.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Failed to parse response from the search backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// Unknown error.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl IndexAdapterError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an authorization error.
    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::AuthorizationError(msg.into())
    }

    /// Create an index creation error with its cause.
    pub fn index_creation(cause: CreationFailure, msg: impl Into<String>) -> Self {
        Self::IndexCreationError {
            cause,
            message: msg.into(),
        }
    }

    /// Create a key not found error.
    pub fn key_not_found(field: impl Into<String>) -> Self {
        Self::KeyNotFound(field.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// Create an unknown error.
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Rewrap any error as an index creation failure, keeping creation
    /// errors that already carry a cause.
    pub fn into_creation_error(self) -> Self {
        match self {
            err @ Self::IndexCreationError { .. } => err,
            Self::ConnectionError(msg) => Self::index_creation(CreationFailure::Network, msg),
            Self::ValidationError(msg) => Self::index_creation(CreationFailure::Validation, msg),
            other => Self::index_creation(CreationFailure::Unknown, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_error_display() {
        let err = IndexAdapterError::index_creation(CreationFailure::Conflict, "exists");
        assert_eq!(err.to_string(), "Index creation error (conflict): exists");
    }

    #[test]
    fn test_into_creation_error() {
        let err = IndexAdapterError::connection("refused").into_creation_error();
        assert!(matches!(
            err,
            IndexAdapterError::IndexCreationError {
                cause: CreationFailure::Network,
                ..
            }
        ));

        let err = IndexAdapterError::parse("bad json").into_creation_error();
        assert!(matches!(
            err,
            IndexAdapterError::IndexCreationError {
                cause: CreationFailure::Unknown,
                ..
            }
        ));

        let original = IndexAdapterError::index_creation(CreationFailure::Conflict, "exists");
        assert!(matches!(
            original.into_creation_error(),
            IndexAdapterError::IndexCreationError {
                cause: CreationFailure::Conflict,
                ..
            }
        ));
    }
}
