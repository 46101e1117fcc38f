//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains pure business logic with zero infrastructure
//! dependencies: the post/file entities, the ports the infrastructure
//! implements, and the content-file reconciliation pipeline.

pub mod content;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
