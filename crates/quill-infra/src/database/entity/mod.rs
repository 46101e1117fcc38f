//! SeaORM entities backing the domain types.

pub mod file;
pub mod post;
pub mod post_file;
