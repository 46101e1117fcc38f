//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::content::PostService;
use quill_core::ports::{FileRepository, FileStore, ObjectStore, PostRepository};
use quill_infra::database::DbErr;
use quill_infra::files::ManagedFileStore;
use quill_infra::storage::S3ObjectStore;
use quill_infra::{PostgresFileRepository, PostgresPostRepository, connect};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<PostService>,
}

impl AppState {
    /// Wire the ports to their infrastructure implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, DbErr> {
        let db = connect(&config.database).await?;

        let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(db.clone()));
        let file_records: Arc<dyn FileRepository> = Arc::new(PostgresFileRepository::new(db));
        let objects: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(config.s3.clone()).await);
        let files: Arc<dyn FileStore> = Arc::new(ManagedFileStore::new(file_records, objects));

        tracing::info!("Application state initialized");

        Ok(Self {
            post_service: Arc::new(PostService::new(posts, files)),
        })
    }
}
