//! # Quill Shared
//!
//! Request/response types shared between the API server and its clients.

pub mod dto;
pub mod response;

pub use dto::{CreatePostRequest, FileResponse, PostResponse, UpdatePostRequest};
pub use response::{ApiResponse, ErrorResponse};
