//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, ModelTrait, QueryFilter, Set,
};
use uuid::Uuid;

use quill_core::domain::{Post, StoredFile};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, FileRepository, PostRepository};

use super::entity::file::{self, Entity as FileEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_file::{self, Entity as PostFileEntity};
use super::postgres_base::{PostgresBaseRepository, map_save_err};

/// PostgreSQL file-record repository.
pub type PostgresFileRepository = PostgresBaseRepository<FileEntity>;

/// PostgreSQL post repository.
///
/// Not built on the generic base: a post row carries an attachment set in
/// the join table, so loads hydrate it and saves replace it.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn hydrate(&self, model: post::Model) -> Result<Post, RepoError> {
        let files = model
            .find_related(FileEntity)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut post: Post = model.into();
        post.attached_files = files.into_iter().map(Into::into).collect();
        Ok(post)
    }

    /// Replace the post's attachment rows wholesale.
    async fn replace_attachments(
        &self,
        post_id: Uuid,
        file_ids: &[Uuid],
    ) -> Result<(), RepoError> {
        PostFileEntity::delete_many()
            .filter(post_file::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if file_ids.is_empty() {
            return Ok(());
        }

        let rows = file_ids.iter().map(|file_id| post_file::ActiveModel {
            post_id: Set(post_id),
            file_id: Set(*file_id),
        });
        PostFileEntity::insert_many(rows)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        match model {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let attachment_ids: Vec<Uuid> = post.attached_files.iter().map(|f| f.id).collect();
        let attached_files = post.attached_files.clone();

        let exists = PostEntity::find_by_id(post.id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .is_some();

        let active: post::ActiveModel = post.into();
        let model = if exists {
            active.update(&self.db).await.map_err(map_save_err)?
        } else {
            active.insert(&self.db).await.map_err(map_save_err)?
        };

        self.replace_attachments(model.id, &attachment_ids).await?;

        let mut saved: Post = model.into();
        saved.attached_files = attached_files;
        Ok(saved)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn exists_by_slug(&self, slug: &str) -> Result<bool, RepoError> {
        let found = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(found.is_some())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let model = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        match model {
            Some(model) => Ok(Some(self.hydrate(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut posts = Vec::with_capacity(models.len());
        for model in models {
            posts.push(self.hydrate(model).await?);
        }
        Ok(posts)
    }
}

#[async_trait]
impl FileRepository for PostgresFileRepository {
    async fn find_by_key_and_owner(
        &self,
        file_key: &str,
        owner_id: Uuid,
    ) -> Result<Option<StoredFile>, RepoError> {
        let result = FileEntity::find()
            .filter(file::Column::FileKey.eq(file_key))
            .filter(file::Column::OwnerUserId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids_and_owner(
        &self,
        ids: &[Uuid],
        owner_id: Uuid,
    ) -> Result<Vec<StoredFile>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = FileEntity::find()
            .filter(file::Column::Id.is_in(ids.iter().copied()))
            .filter(file::Column::OwnerUserId.eq(owner_id))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
