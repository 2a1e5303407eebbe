//! User representations exposed over HTTP.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::entities::{Role, User};

/// Public view of a user. The password hash is never serialized.
///
/// # Example
///
/// ```json
/// {
///   "id": 7,
///   "name": "Ada",
///   "email": "ada@example.com",
///   "birthAt": "1815-12-10",
///   "role": "admin",
///   "createdAt": "2024-01-15T10:30:00Z",
///   "updatedAt": "2024-01-15T10:30:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub birth_at: Option<NaiveDate>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserItem {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            birth_at: user.birth_at,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Body of `GET /users`.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub items: Vec<UserItem>,
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        Self {
            items: users.into_iter().map(UserItem::from).collect(),
        }
    }
}

/// Body of `DELETE /users/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub id: i64,
    pub deleted: bool,
}
