//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod file_store;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use file_store::{FileStore, ObjectStore};
pub use repository::{BaseRepository, FileRepository, PostRepository};
