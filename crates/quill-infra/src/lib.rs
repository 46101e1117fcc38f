//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`: the SeaORM
//! repositories, the S3-backed object store, the managed file store combining
//! the two, and the JWT token service.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - Port composition only, no external backends
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT token service
//! - `s3` - S3 object store via the AWS SDK

pub mod files;

#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "s3")]
pub mod storage;

pub use files::ManagedFileStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresFileRepository, PostgresPostRepository, connect};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

#[cfg(feature = "s3")]
pub use storage::S3ObjectStore;
