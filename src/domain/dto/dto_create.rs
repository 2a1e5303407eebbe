use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::Role;

/// Payload for `POST /users`.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid e-mail address"))]
    #[validate(length(max = 255))]
    pub email: String,

    // bcrypt ignores input beyond 72 bytes
    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,

    /// Calendar date, `YYYY-MM-DD`.
    pub birth_at: Option<NaiveDate>,

    /// Defaults to [`Role::User`] when omitted.
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> serde_json::Value {
        json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret1",
            "birthAt": "1990-04-12",
            "role": "admin"
        })
    }

    #[test]
    fn test_parses_camel_case_fields() {
        let dto: CreateUserDto = serde_json::from_value(valid()).unwrap();

        assert_eq!(dto.birth_at, NaiveDate::from_ymd_opt(1990, 4, 12));
        assert_eq!(dto.role, Some(Role::Admin));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_optional_fields_may_be_omitted() {
        let dto: CreateUserDto = serde_json::from_value(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "password": "secret1"
        }))
        .unwrap();

        assert!(dto.birth_at.is_none());
        assert!(dto.role.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_email_and_short_password() {
        let mut body = valid();
        body["email"] = json!("not-an-email");
        body["password"] = json!("123");
        let dto: CreateUserDto = serde_json::from_value(body).unwrap();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_rejects_empty_name() {
        let mut body = valid();
        body["name"] = json!("");
        let dto: CreateUserDto = serde_json::from_value(body).unwrap();

        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_role() {
        let mut body = valid();
        body["role"] = json!("superuser");

        assert!(serde_json::from_value::<CreateUserDto>(body).is_err());
    }
}
