use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::serde_as;
use validator::Validate;

use crate::domain::entities::Role;

/// Payload for `PATCH /users/{id}`.
///
/// Every field is optional; only provided fields are changed.
///
/// # `birthAt` semantics
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear the birth date
/// - **Date** → set new birth date
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatchUserDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid e-mail address"))]
    #[validate(length(max = 255))]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub birth_at: Option<Option<NaiveDate>>,

    pub role: Option<Role>,
}

impl UpdatePatchUserDto {
    /// Returns true when the payload carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.birth_at.is_none()
            && self.role.is_none()
    }
}
