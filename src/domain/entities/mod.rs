//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! and modification:
//! - [`NewUser`] - For inserting new records
//! - [`UserChanges`] - For full or partial updates

pub mod role;
pub mod user;

pub use role::Role;
pub use user::{NewUser, User, UserChanges};
