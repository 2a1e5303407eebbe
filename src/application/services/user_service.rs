//! User management service.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::application::services::PasswordHasher;
use crate::domain::dto::{CreateUserDto, UpdatePatchUserDto, UpdatePutUserDto};
use crate::domain::entities::{NewUser, User, UserChanges};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Operations the `/users` controller delegates to.
///
/// Every method either returns the resulting entity or a domain error that
/// the controller passes through untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the e-mail is already in use.
    async fn create(&self, data: CreateUserDto) -> Result<User, AppError>;

    /// Returns every user.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Returns a single user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    async fn show(&self, id: i64) -> Result<User, AppError>;

    /// Replaces a user's data.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    /// Returns [`AppError::Conflict`] if the e-mail belongs to another user.
    async fn update(&self, id: i64, data: UpdatePutUserDto) -> Result<User, AppError>;

    /// Changes only the supplied fields.
    ///
    /// # Errors
    ///
    /// Same as [`UserService::update`].
    async fn update_partial(&self, id: i64, data: UpdatePatchUserDto) -> Result<User, AppError>;

    /// Removes a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has this id.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

/// Repository-backed [`UserService`].
///
/// E-mails are trimmed and lowercased before they are stored or compared.
/// Passwords are hashed with [`PasswordHasher`] before they reach the repository.
pub struct UserManager<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> UserManager<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    async fn ensure_exists(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} does not exist"), json!({"id": id})))
    }

    /// Fails if `email` belongs to a user other than `owner`.
    async fn ensure_email_available(&self, email: &str, owner: Option<i64>) -> Result<(), AppError> {
        match self.repository.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::conflict(
                "E-mail is already in use",
                json!({"email": email}),
            )),
            _ => Ok(()),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl<R: UserRepository> UserService for UserManager<R> {
    async fn create(&self, data: CreateUserDto) -> Result<User, AppError> {
        let email = normalize_email(&data.email);
        self.ensure_email_available(&email, None).await?;

        let new_user = NewUser {
            name: data.name,
            email,
            password_hash: self.hasher.hash(data.password).await?,
            birth_at: data.birth_at,
            role: data.role.unwrap_or_default(),
        };

        let user = self.repository.create(new_user).await?;
        tracing::info!(user_id = user.id, role = %user.role, "User created");

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }

    async fn show(&self, id: i64) -> Result<User, AppError> {
        self.ensure_exists(id).await
    }

    async fn update(&self, id: i64, data: UpdatePutUserDto) -> Result<User, AppError> {
        self.ensure_exists(id).await?;

        let email = normalize_email(&data.email);
        self.ensure_email_available(&email, Some(id)).await?;

        let changes = UserChanges {
            name: Some(data.name),
            email: Some(email),
            password_hash: Some(self.hasher.hash(data.password).await?),
            birth_at: Some(data.birth_at),
            role: data.role,
        };

        let user = self.repository.update(id, changes).await?;
        tracing::info!(user_id = id, "User replaced");

        Ok(user)
    }

    async fn update_partial(&self, id: i64, data: UpdatePatchUserDto) -> Result<User, AppError> {
        let current = self.ensure_exists(id).await?;

        if data.is_empty() {
            return Ok(current);
        }

        let email = match data.email {
            Some(email) => {
                let email = normalize_email(&email);
                self.ensure_email_available(&email, Some(id)).await?;
                Some(email)
            }
            None => None,
        };

        let password_hash = match data.password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let changes = UserChanges {
            name: data.name,
            email,
            password_hash,
            birth_at: data.birth_at,
            role: data.role,
        };

        let user = self.repository.update(id, changes).await?;
        tracing::info!(user_id = id, "User updated");

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.ensure_exists(id).await?;

        // Row may vanish between the check and the delete.
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found(
                format!("User {id} does not exist"),
                json!({"id": id}),
            ));
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
