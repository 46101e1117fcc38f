//! The reconciler: keeps a post's attachment set consistent with what its
//! content references and garbage-collects uploads edited out of it.
//!
//! Everything inside the linking and cleanup passes is best-effort: a URL
//! that resolves to nothing, a key with no owned record, or a file whose
//! deletion fails is logged and skipped. Only the post's own persist and
//! slug generation propagate as hard errors.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::Post;
use crate::error::{DomainError, RepoError};
use crate::ports::{FileStore, PostRepository};

use super::extract::extract_image_urls;
use super::resolve::resolve_key;
use super::slug::{ensure_unique_slug, regenerate_unique_slug};
use super::thumbnail::derive_thumbnail;

/// Rounds of slug regeneration when the store's unique constraint rejects a
/// save that the probe loop thought was safe.
const SLUG_SAVE_ROUNDS: u32 = 3;

/// Capability carrying the authenticated caller's identity.
///
/// Every reconciler operation is scoped to one author; ownership checks go
/// through this value instead of ad hoc id comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorScope {
    pub user_id: Uuid,
}

impl AuthorScope {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Data for creating a post.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreatePost {
    pub title: String,
    /// HTML body.
    pub content: String,
    /// Explicit attachment list; ids the caller does not own are dropped
    /// silently.
    pub attached_file_ids: Option<Vec<Uuid>>,
}

/// Data for updating a post. `None` fields are left untouched.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    /// When present, replaces the attachment set wholesale (owner-filtered).
    pub attached_file_ids: Option<Vec<Uuid>>,
}

/// Post service - orchestrates slug generation, thumbnail derivation,
/// attachment linking, and orphaned-upload cleanup around the post store.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    files: Arc<dyn FileStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, files: Arc<dyn FileStore>) -> Self {
        Self { posts, files }
    }

    /// Create a post: slug, thumbnail, explicit attachments, content-linked
    /// attachments, one persist.
    pub async fn create_post(
        &self,
        scope: &AuthorScope,
        req: CreatePost,
    ) -> Result<Post, DomainError> {
        if req.title.trim().is_empty() {
            return Err(DomainError::Validation("Title cannot be empty".into()));
        }

        let mut post = Post::new(scope.user_id, req.title, req.content);
        post.slug = Some(ensure_unique_slug(&post.title, post.created_at, self.posts.as_ref()).await?);
        post.thumbnail = derive_thumbnail(&post.content);

        if let Some(ids) = &req.attached_file_ids {
            for file in self.files.find_by_ids_and_owner(ids, scope.user_id).await? {
                post.attach(file);
            }
        }
        self.link_content_files(&mut post, scope).await;

        let post = self.persist_new(post).await?;
        info!(post_id = %post.id, author_id = %scope.user_id, slug = ?post.slug, "Post created");
        Ok(post)
    }

    /// Update a post the caller owns.
    ///
    /// A content change first garbage-collects uploads whose keys dropped
    /// out of the content, then the post is saved with a re-derived
    /// thumbnail, a wholesale-replaced attachment set if one was supplied,
    /// and any newly embedded images linked in.
    pub async fn update_post(
        &self,
        scope: &AuthorScope,
        post_id: Uuid,
        req: UpdatePost,
    ) -> Result<Post, DomainError> {
        let mut post = self.load_owned(scope, post_id).await?;

        if let Some(new_content) = &req.content {
            if *new_content != post.content {
                let deleted = self
                    .cleanup_removed_images(&post.content, new_content, scope)
                    .await;
                post.attached_files.retain(|f| !deleted.contains(&f.id));
            }
        }

        if let Some(title) = req.title {
            if title.trim().is_empty() {
                return Err(DomainError::Validation("Title cannot be empty".into()));
            }
            post.title = title;
        }
        if let Some(content) = req.content {
            post.content = content;
        }
        post.thumbnail = derive_thumbnail(&post.content);
        post.updated_at = Utc::now();

        if let Some(ids) = &req.attached_file_ids {
            post.attached_files = self.files.find_by_ids_and_owner(ids, scope.user_id).await?;
        }
        self.link_content_files(&mut post, scope).await;

        let post = self.posts.save(post).await?;
        info!(post_id = %post.id, author_id = %scope.user_id, "Post updated");
        Ok(post)
    }

    /// Delete a post the caller owns. Attachment rows cascade away; the file
    /// records themselves are left for their own lifecycle.
    pub async fn delete_post(&self, scope: &AuthorScope, post_id: Uuid) -> Result<(), DomainError> {
        let post = self.load_owned(scope, post_id).await?;
        self.posts.delete(post.id).await?;
        info!(post_id = %post_id, author_id = %scope.user_id, "Post deleted");
        Ok(())
    }

    /// Mark a post as published. Content is untouched; no reconciliation
    /// runs.
    pub async fn publish_post(&self, scope: &AuthorScope, post_id: Uuid) -> Result<Post, DomainError> {
        let mut post = self.load_owned(scope, post_id).await?;
        if post.published_at.is_none() {
            post.published_at = Some(Utc::now());
            post.updated_at = Utc::now();
            post = self.posts.save(post).await?;
            info!(post_id = %post_id, "Post published");
        }
        Ok(post)
    }

    /// Clear a post's published state.
    pub async fn unpublish_post(
        &self,
        scope: &AuthorScope,
        post_id: Uuid,
    ) -> Result<Post, DomainError> {
        let mut post = self.load_owned(scope, post_id).await?;
        if post.published_at.is_some() {
            post.published_at = None;
            post.updated_at = Utc::now();
            post = self.posts.save(post).await?;
            info!(post_id = %post_id, "Post unpublished");
        }
        Ok(post)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.find_by_slug(slug).await?)
    }

    pub async fn list_by_author(&self, scope: &AuthorScope) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author(scope.user_id).await?)
    }

    /// Link files referenced by the post's content into its attachment set.
    ///
    /// Union by file id: a file already attached is never duplicated, so
    /// running this twice over unchanged content is a no-op. Lookup misses
    /// and unresolvable URLs are skipped.
    pub async fn link_content_files(&self, post: &mut Post, scope: &AuthorScope) {
        for url in extract_image_urls(&post.content) {
            let Some(key) = resolve_key(&url) else {
                debug!(%url, "image url is not an upload reference; skipping");
                continue;
            };
            match self.files.find_by_key_and_owner(&key, scope.user_id).await {
                Ok(Some(file)) => {
                    if !post.has_attached(file.id) {
                        debug!(post_id = %post.id, file_id = %file.id, %key, "Linking content file");
                        post.attach(file);
                    }
                }
                Ok(None) => {
                    debug!(%key, "no owned file record for key; skipping");
                }
                Err(e) => {
                    warn!(%key, error = %e, "file lookup failed during content linking");
                }
            }
        }
    }

    /// Delete uploads referenced by the old content but not the new.
    ///
    /// Returns the ids actually deleted. Each file is handled independently:
    /// one failed deletion is logged and the rest proceed.
    async fn cleanup_removed_images(
        &self,
        old_content: &str,
        new_content: &str,
        scope: &AuthorScope,
    ) -> HashSet<Uuid> {
        let old_keys = resolved_key_set(old_content);
        let new_keys = resolved_key_set(new_content);

        let mut deleted = HashSet::new();
        for key in old_keys.difference(&new_keys) {
            let file = match self.files.find_by_key_and_owner(key, scope.user_id).await {
                Ok(Some(file)) => file,
                Ok(None) => continue,
                Err(e) => {
                    warn!(%key, error = %e, "file lookup failed during cleanup");
                    continue;
                }
            };
            match self.files.delete_by_id(file.id, scope.user_id).await {
                Ok(()) => {
                    info!(file_id = %file.id, %key, "Deleted upload no longer referenced by content");
                    deleted.insert(file.id);
                }
                Err(e) => {
                    warn!(file_id = %file.id, %key, error = %e, "failed to delete orphaned upload");
                }
            }
        }
        deleted
    }

    async fn load_owned(&self, scope: &AuthorScope, post_id: Uuid) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id: post_id,
            })?;
        if post.author_id != scope.user_id {
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }

    /// First persist of a new post, regenerating the slug when the store's
    /// unique constraint rejects it.
    ///
    /// The constraint fires exactly when the probe missed a competing row,
    /// so the replacement must come from the disambiguating retry path; the
    /// deterministic candidate would just be resubmitted verbatim.
    async fn persist_new(&self, mut post: Post) -> Result<Post, DomainError> {
        for round in 0..SLUG_SAVE_ROUNDS {
            match self.posts.save(post.clone()).await {
                Ok(saved) => return Ok(saved),
                Err(RepoError::Constraint(msg)) => {
                    warn!(round, %msg, "slug rejected by unique constraint; regenerating");
                    post.slug = Some(
                        regenerate_unique_slug(&post.title, post.created_at, self.posts.as_ref())
                            .await?,
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(DomainError::SlugExhausted {
            attempts: SLUG_SAVE_ROUNDS,
        })
    }
}

/// The de-duplicated set of storage keys a content body references.
fn resolved_key_set(content: &str) -> HashSet<String> {
    extract_image_urls(content)
        .into_iter()
        .filter_map(|url| resolve_key(&url))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::domain::{FileType, StoredFile};
    use crate::error::FileStoreError;
    use crate::ports::BaseRepository;

    use super::*;

    #[derive(Default)]
    struct InMemoryPosts {
        rows: Mutex<HashMap<Uuid, Post>>,
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for InMemoryPosts {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, post: Post) -> Result<Post, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(slug) = &post.slug {
                let collision = rows
                    .values()
                    .any(|p| p.id != post.id && p.slug.as_deref() == Some(slug));
                if collision {
                    return Err(RepoError::Constraint("posts_slug_key".into()));
                }
            }
            rows.insert(post.id, post.clone());
            Ok(post)
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            match self.rows.lock().unwrap().remove(&id) {
                Some(_) => Ok(()),
                None => Err(RepoError::NotFound),
            }
        }
    }

    #[async_trait]
    impl PostRepository for InMemoryPosts {
        async fn exists_by_slug(&self, slug: &str) -> Result<bool, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .any(|p| p.slug.as_deref() == Some(slug)))
        }

        async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|p| p.slug.as_deref() == Some(slug))
                .cloned())
        }

        async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct InMemoryFiles {
        rows: Mutex<HashMap<Uuid, StoredFile>>,
        deleted: Mutex<Vec<Uuid>>,
        failing: Mutex<HashSet<Uuid>>,
    }

    impl InMemoryFiles {
        fn insert(&self, file: StoredFile) {
            self.rows.lock().unwrap().insert(file.id, file);
        }

        fn fail_deletion_of(&self, id: Uuid) {
            self.failing.lock().unwrap().insert(id);
        }

        fn deletions_of(&self, id: Uuid) -> usize {
            self.deleted.lock().unwrap().iter().filter(|d| **d == id).count()
        }
    }

    #[async_trait]
    impl FileStore for InMemoryFiles {
        async fn find_by_key_and_owner(
            &self,
            file_key: &str,
            owner_id: Uuid,
        ) -> Result<Option<StoredFile>, RepoError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .find(|f| f.file_key == file_key && f.owner_user_id == owner_id)
                .cloned())
        }

        async fn find_by_ids_and_owner(
            &self,
            ids: &[Uuid],
            owner_id: Uuid,
        ) -> Result<Vec<StoredFile>, RepoError> {
            let rows = self.rows.lock().unwrap();
            Ok(ids
                .iter()
                .filter_map(|id| rows.get(id))
                .filter(|f| f.owner_user_id == owner_id)
                .cloned()
                .collect())
        }

        async fn delete_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<(), FileStoreError> {
            if self.failing.lock().unwrap().contains(&id) {
                self.deleted.lock().unwrap().push(id);
                return Err(FileStoreError::ObjectStore {
                    key: id.to_string(),
                    reason: "simulated outage".into(),
                });
            }
            let removed = {
                let mut rows = self.rows.lock().unwrap();
                match rows.get(&id) {
                    Some(f) if f.owner_user_id == owner_id => rows.remove(&id).is_some(),
                    _ => false,
                }
            };
            if !removed {
                return Err(FileStoreError::NotFound);
            }
            self.deleted.lock().unwrap().push(id);
            Ok(())
        }
    }

    /// Post store simulating the probe race: `exists_by_slug` never sees the
    /// competing row, but the unique constraint rejects the first saves.
    struct RacingPosts {
        submitted_slugs: Mutex<Vec<String>>,
        rejections_left: Mutex<u32>,
    }

    impl RacingPosts {
        fn rejecting(n: u32) -> Self {
            Self {
                submitted_slugs: Mutex::new(Vec::new()),
                rejections_left: Mutex::new(n),
            }
        }
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for RacingPosts {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }

        async fn save(&self, post: Post) -> Result<Post, RepoError> {
            if let Some(slug) = &post.slug {
                self.submitted_slugs.lock().unwrap().push(slug.clone());
            }
            let mut left = self.rejections_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                return Err(RepoError::Constraint("posts_slug_key".into()));
            }
            Ok(post)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl PostRepository for RacingPosts {
        async fn exists_by_slug(&self, _slug: &str) -> Result<bool, RepoError> {
            Ok(false)
        }

        async fn find_by_slug(&self, _slug: &str) -> Result<Option<Post>, RepoError> {
            Ok(None)
        }

        async fn find_by_author(&self, _author_id: Uuid) -> Result<Vec<Post>, RepoError> {
            Ok(Vec::new())
        }
    }

    fn stored_file(key: &str, owner: Uuid) -> StoredFile {
        StoredFile {
            id: Uuid::new_v4(),
            file_key: key.to_string(),
            file_url: key.to_string(),
            original_name: "cat.png".to_string(),
            mime_type: "image/png".to_string(),
            file_size: 1024,
            file_type: FileType::Image,
            owner_user_id: owner,
            created_at: Utc::now(),
        }
    }

    fn service() -> (PostService, Arc<InMemoryPosts>, Arc<InMemoryFiles>) {
        let posts = Arc::new(InMemoryPosts::default());
        let files = Arc::new(InMemoryFiles::default());
        let svc = PostService::new(posts.clone(), files.clone());
        (svc, posts, files)
    }

    fn img(key: &str) -> String {
        format!(r#"<img src="{key}">"#)
    }

    #[tokio::test]
    async fn create_links_owned_content_files() {
        let (svc, _, files) = service();
        let author = AuthorScope::new(Uuid::new_v4());
        let file = stored_file("uploads/image/2024/01/cat.png", author.user_id);
        let file_id = file.id;
        files.insert(file);

        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Cats".into(),
                    content: img("uploads/image/2024/01/cat.png"),
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(post.attached_files.len(), 1);
        assert_eq!(post.attached_files[0].id, file_id);
        assert!(post.slug.is_some());
        assert_eq!(
            post.thumbnail.as_deref(),
            Some("/api/v1/files/proxy/uploads/image/2024/01/cat.png")
        );
    }

    #[tokio::test]
    async fn create_never_links_another_users_file() {
        let (svc, _, files) = service();
        let author = AuthorScope::new(Uuid::new_v4());
        let stranger = Uuid::new_v4();
        files.insert(stored_file("uploads/image/2024/01/cat.png", stranger));

        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Cats".into(),
                    content: img("uploads/image/2024/01/cat.png"),
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap();

        assert!(post.attached_files.is_empty());
    }

    #[tokio::test]
    async fn explicit_ids_are_owner_filtered_silently() {
        let (svc, _, files) = service();
        let author = AuthorScope::new(Uuid::new_v4());
        let mine = stored_file("uploads/doc/2024/01/a.pdf", author.user_id);
        let theirs = stored_file("uploads/doc/2024/01/b.pdf", Uuid::new_v4());
        let mine_id = mine.id;
        let theirs_id = theirs.id;
        files.insert(mine);
        files.insert(theirs);

        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Docs".into(),
                    content: "<p>no images</p>".into(),
                    attached_file_ids: Some(vec![mine_id, theirs_id]),
                },
            )
            .await
            .unwrap();

        let ids: Vec<Uuid> = post.attached_files.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![mine_id]);
    }

    #[tokio::test]
    async fn linking_is_idempotent() {
        let (svc, _, files) = service();
        let author = AuthorScope::new(Uuid::new_v4());
        files.insert(stored_file("uploads/image/2024/01/cat.png", author.user_id));

        let content = img("uploads/image/2024/01/cat.png");
        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Cats".into(),
                    content: content.clone(),
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(post.attached_files.len(), 1);

        // Re-saving the same content must not grow the attachment set.
        let post = svc
            .update_post(
                &author,
                post.id,
                UpdatePost {
                    content: Some(content),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(post.attached_files.len(), 1);
    }

    #[tokio::test]
    async fn removing_an_image_deletes_its_file_exactly_once() {
        let (svc, _, files) = service();
        let author = AuthorScope::new(Uuid::new_v4());
        let old = stored_file("uploads/image/2024/01/old.png", author.user_id);
        let old_id = old.id;
        files.insert(old);
        files.insert(stored_file("uploads/image/2024/01/new.png", author.user_id));

        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Edit me".into(),
                    content: img("uploads/image/2024/01/old.png"),
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap();

        let post = svc
            .update_post(
                &author,
                post.id,
                UpdatePost {
                    content: Some(img("uploads/image/2024/01/new.png")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(files.deletions_of(old_id), 1);
        assert!(!post.attached_files.iter().any(|f| f.id == old_id));
        assert_eq!(post.attached_files.len(), 1);
    }

    #[tokio::test]
    async fn deletion_failure_does_not_abort_the_update() {
        let (svc, _, files) = service();
        let author = AuthorScope::new(Uuid::new_v4());
        let flaky = stored_file("uploads/image/2024/01/flaky.png", author.user_id);
        let doomed = stored_file("uploads/image/2024/01/doomed.png", author.user_id);
        let flaky_id = flaky.id;
        let doomed_id = doomed.id;
        files.insert(flaky);
        files.insert(doomed);
        files.fail_deletion_of(flaky_id);

        let content = format!(
            "{}{}",
            img("uploads/image/2024/01/flaky.png"),
            img("uploads/image/2024/01/doomed.png")
        );
        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Cleanup".into(),
                    content,
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap();

        // Both images removed; one deletion fails, the other must proceed
        // and the update itself must succeed.
        let updated = svc
            .update_post(
                &author,
                post.id,
                UpdatePost {
                    content: Some("<p>clean</p>".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(files.deletions_of(doomed_id), 1);
        assert_eq!(updated.thumbnail, None);
    }

    #[tokio::test]
    async fn same_title_same_instant_gets_distinct_slugs() {
        let (svc, _, _) = service();
        let author = AuthorScope::new(Uuid::new_v4());
        let req = CreatePost {
            title: "Hello World!".into(),
            content: String::new(),
            attached_file_ids: None,
        };

        let a = svc.create_post(&author, req.clone()).await.unwrap();
        let b = svc.create_post(&author, req).await.unwrap();

        assert!(a.slug.is_some() && b.slug.is_some());
        assert_ne!(a.slug, b.slug);
    }

    #[tokio::test]
    async fn constraint_rejection_submits_a_different_slug() {
        let posts = Arc::new(RacingPosts::rejecting(1));
        let files = Arc::new(InMemoryFiles::default());
        let svc = PostService::new(posts.clone(), files);
        let author = AuthorScope::new(Uuid::new_v4());

        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Race".into(),
                    content: String::new(),
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap();

        let submitted = posts.submitted_slugs.lock().unwrap().clone();
        assert_eq!(submitted.len(), 2);
        assert_ne!(submitted[0], submitted[1], "retry resubmitted {}", submitted[0]);
        assert_eq!(post.slug.as_deref(), Some(submitted[1].as_str()));
    }

    #[tokio::test]
    async fn repeated_constraint_rejections_exhaust_loudly() {
        let posts = Arc::new(RacingPosts::rejecting(u32::MAX));
        let files = Arc::new(InMemoryFiles::default());
        let svc = PostService::new(posts.clone(), files);
        let author = AuthorScope::new(Uuid::new_v4());

        let err = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Race".into(),
                    content: String::new(),
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SlugExhausted { .. }));

        // No round may resubmit the rejected deterministic candidate.
        let submitted = posts.submitted_slugs.lock().unwrap().clone();
        assert_eq!(submitted.len(), 3);
        assert!(submitted[1..].iter().all(|s| s != &submitted[0]));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden() {
        let (svc, _, _) = service();
        let author = AuthorScope::new(Uuid::new_v4());
        let intruder = AuthorScope::new(Uuid::new_v4());

        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Mine".into(),
                    content: String::new(),
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap();

        let err = svc
            .update_post(&intruder, post.id, UpdatePost::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden));
    }

    #[tokio::test]
    async fn thumbnail_follows_content() {
        let (svc, _, _) = service();
        let author = AuthorScope::new(Uuid::new_v4());

        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Pictures".into(),
                    content: img("uploads/image/2024/01/a.png"),
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(
            post.thumbnail.as_deref(),
            Some("/api/v1/files/proxy/uploads/image/2024/01/a.png")
        );

        let post = svc
            .update_post(
                &author,
                post.id,
                UpdatePost {
                    content: Some("<p>words now</p>".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(post.thumbnail, None);
    }

    #[tokio::test]
    async fn publish_sets_and_clears_timestamp() {
        let (svc, _, _) = service();
        let author = AuthorScope::new(Uuid::new_v4());

        let post = svc
            .create_post(
                &author,
                CreatePost {
                    title: "Draft".into(),
                    content: String::new(),
                    attached_file_ids: None,
                },
            )
            .await
            .unwrap();
        assert!(post.published_at.is_none());

        let post = svc.publish_post(&author, post.id).await.unwrap();
        assert!(post.published_at.is_some());

        let post = svc.unpublish_post(&author, post.id).await.unwrap();
        assert!(post.published_at.is_none());
    }
}
