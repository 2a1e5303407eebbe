//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures ([`entities::User`], [`entities::Role`])
//! - [`dto`] - Validated input accepted by the user service
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Repository traits are implemented in `crate::infrastructure::persistence`.

pub mod dto;
pub mod entities;
pub mod repositories;
