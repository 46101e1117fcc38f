//! Database connection management and SeaORM repositories.

mod connections;
mod postgres_base;
pub mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use sea_orm::{DbConn, DbErr};
pub use postgres_repo::{PostgresFileRepository, PostgresPostRepository};
