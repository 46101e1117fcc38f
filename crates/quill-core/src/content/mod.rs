//! The content-file reconciliation pipeline.
//!
//! Post bodies are HTML that may embed uploaded images under several URL
//! shapes. This module scans the HTML, maps each image URL back to its
//! canonical storage key, keeps the post's attachment set in sync with what
//! the content actually references, garbage-collects uploads that were
//! edited out, and derives slugs and thumbnails.

pub mod extract;
pub mod reconcile;
pub mod resolve;
pub mod slug;
pub mod thumbnail;

pub use reconcile::{AuthorScope, CreatePost, PostService, UpdatePost};
