use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::Role;

/// Payload for `PUT /users/{id}`: full replacement.
///
/// An omitted `birthAt` clears the stored date. An omitted `role` keeps the
/// current one.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePutUserDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid e-mail address"))]
    #[validate(length(max = 255))]
    pub email: String,

    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,

    pub birth_at: Option<NaiveDate>,

    pub role: Option<Role>,
}
