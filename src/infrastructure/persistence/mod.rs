//! PostgreSQL repository implementations.
//!
//! Queries are checked at runtime (`sqlx::query_as`) so the crate builds
//! without a live database or an offline query cache.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User account storage

pub mod pg_user_repository;

pub use pg_user_repository::PgUserRepository;
