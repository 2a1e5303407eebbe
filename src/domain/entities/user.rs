//! User entity and its persistence change sets.

use chrono::{DateTime, NaiveDate, Utc};

use super::Role;

/// A registered user account.
///
/// `password_hash` is a bcrypt hash and never leaves the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub birth_at: Option<NaiveDate>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Input data for inserting a new user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub birth_at: Option<NaiveDate>,
    pub role: Role,
}

/// Column-level change set applied to an existing user.
///
/// `None` fields are left unchanged.
/// `birth_at: Some(None)` clears the date; `Some(Some(d))` sets it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub birth_at: Option<Option<NaiveDate>>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
