//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User, UserChanges};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for storing user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the e-mail is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Lists all users ordered by id.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by e-mail (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Applies a change set and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Conflict`] if the new e-mail is already taken.
    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, AppError>;

    /// Deletes a user.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if a row was removed
    /// - `Ok(false)` if no user had this id
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts accounts holding the admin role.
    async fn count_admins(&self) -> Result<i64, AppError>;
}
