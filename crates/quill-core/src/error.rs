//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    /// The caller does not own the entity it tried to mutate.
    #[error("Forbidden: caller does not own this resource")]
    Forbidden,

    /// The slug probe loop hit its retry cap without finding a free slug.
    #[error("Could not derive a unique slug after {attempts} attempts")]
    SlugExhausted { attempts: u32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Errors from the file-store collaborator.
///
/// Deleting a file touches two backends (object store, then record store);
/// either half can fail independently.
#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("Object store operation failed for key {key}: {reason}")]
    ObjectStore { key: String, reason: String },

    #[error("File record operation failed: {0}")]
    Record(#[from] RepoError),

    #[error("File not found")]
    NotFound,
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::Internal("entity vanished mid-operation".into()),
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
