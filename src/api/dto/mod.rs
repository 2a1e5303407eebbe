//! Response bodies returned by the HTTP API.
//!
//! Request payloads live in [`crate::domain::dto`] because the service layer
//! consumes them directly.

pub mod health;
pub mod user;
