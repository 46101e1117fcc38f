use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category tag recorded at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Video,
    Document,
    Other,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Document => "document",
            FileType::Other => "other",
        }
    }
}

impl From<&str> for FileType {
    fn from(s: &str) -> Self {
        match s {
            "image" => FileType::Image,
            "video" => FileType::Video,
            "document" => FileType::Document,
            _ => FileType::Other,
        }
    }
}

/// StoredFile entity - a record of an uploaded object.
///
/// Created by the upload flow (outside this crate); referenced by posts via
/// the attachment association; deleted by the reconciler once its key no
/// longer appears in the owning post's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: Uuid,
    /// Canonical storage key, e.g. `uploads/image/2024/01/cat.png`.
    pub file_key: String,
    /// Historically stores the same value as `file_key`, not a live URL.
    pub file_url: String,
    pub original_name: String,
    pub mime_type: String,
    pub file_size: i64,
    pub file_type: FileType,
    pub owner_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
