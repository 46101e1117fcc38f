use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StoredFile;

/// Post entity - a blog post with HTML content and attached uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    /// Unique once assigned; generated, never client-supplied.
    pub slug: Option<String>,
    /// HTML body. Image tags inside it drive the attachment set.
    pub content: String,
    /// Always re-derived from content on save; never independently set.
    pub thumbnail: Option<String>,
    /// Membership is by file id; order carries no meaning.
    pub attached_files: Vec<StoredFile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new unsaved post. Slug and thumbnail are filled in by the
    /// reconciliation pipeline before the first persist.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            slug: None,
            content,
            thumbnail: None,
            attached_files: Vec::new(),
            created_at: now,
            updated_at: now,
            published_at: None,
        }
    }

    /// Whether a file with this id is already attached.
    pub fn has_attached(&self, file_id: Uuid) -> bool {
        self.attached_files.iter().any(|f| f.id == file_id)
    }

    /// Attach a file unless a file with the same id is already present.
    pub fn attach(&mut self, file: StoredFile) {
        if !self.has_attached(file.id) {
            self.attached_files.push(file);
        }
    }
}
