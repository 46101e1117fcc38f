//! File-store collaborator ports.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::StoredFile;
use crate::error::{FileStoreError, RepoError};

/// The file-store collaborator the reconciler talks to.
///
/// Lookups are owner-scoped. `delete_by_id` removes both the stored object
/// and the database record; the two deletes are not transactional (a crash
/// in between leaves a record pointing at a missing object).
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn find_by_key_and_owner(
        &self,
        file_key: &str,
        owner_id: Uuid,
    ) -> Result<Option<StoredFile>, RepoError>;

    async fn find_by_ids_and_owner(
        &self,
        ids: &[Uuid],
        owner_id: Uuid,
    ) -> Result<Vec<StoredFile>, RepoError>;

    /// Hard-delete a file the caller owns: object first, record second.
    async fn delete_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<(), FileStoreError>;
}

/// Trait for the object-storage backend holding uploaded bytes.
///
/// Only the operations the reconciliation pipeline needs; uploads live in a
/// separate flow with its own surface.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Delete the object at the given storage key.
    async fn delete(&self, key: &str) -> Result<(), FileStoreError>;

    /// Check whether an object exists at the given storage key.
    async fn exists(&self, key: &str) -> Result<bool, FileStoreError>;
}
