mod file;
mod post;

pub use file::{FileType, StoredFile};
pub use post::Post;
