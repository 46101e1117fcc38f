use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, StoredFile};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository with the domain-specific queries the reconciler and the
/// HTTP layer need. `save` persists the post's own columns and replaces its
/// attachment rows to match `attached_files`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Probe used by the slug generator. Subject to check-then-act races;
    /// the unique index on the slug column is the backstop.
    async fn exists_by_slug(&self, slug: &str) -> Result<bool, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;
}

/// File-record queries, always scoped to an owner: a key match belonging to
/// a different user is treated as no match at all.
#[async_trait]
pub trait FileRepository: BaseRepository<StoredFile, Uuid> {
    async fn find_by_key_and_owner(
        &self,
        file_key: &str,
        owner_id: Uuid,
    ) -> Result<Option<StoredFile>, RepoError>;

    /// Ids not owned by `owner_id` are silently absent from the result.
    async fn find_by_ids_and_owner(
        &self,
        ids: &[Uuid],
        owner_id: Uuid,
    ) -> Result<Vec<StoredFile>, RepoError>;
}
