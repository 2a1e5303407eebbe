//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to API contracts. It holds no business logic.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`extract`] - Validating extractors (`ParamId`, `ValidatedJson`)
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, role, rate limiting and tracing layers
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
