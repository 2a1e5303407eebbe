//! Business logic services for the application layer.

pub mod auth_service;
pub mod password;
pub mod user_service;

pub use auth_service::{Authenticator, Claims, Identity, JwtAuthenticator, TokenCodec};
pub use password::PasswordHasher;
pub use user_service::{UserManager, UserService};

#[cfg(test)]
pub use auth_service::MockAuthenticator;
#[cfg(test)]
pub use user_service::MockUserService;
