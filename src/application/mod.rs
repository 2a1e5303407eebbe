//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the contracts the HTTP
//! layer depends on.
//!
//! # Available Services
//!
//! - [`services::user_service::UserService`] - User CRUD consumed by the `/users` controller
//! - [`services::auth_service::Authenticator`] - Bearer token to identity resolution
//! - [`services::password::PasswordHasher`] - bcrypt hashing on the blocking pool

pub mod services;
