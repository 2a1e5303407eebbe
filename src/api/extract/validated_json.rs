//! JSON body extractor that runs `validator` rules after deserialization.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use crate::error::AppError;

/// Works like [`axum::Json`], then calls [`Validate::validate`].
///
/// Malformed JSON, a wrong content type, unknown enum values and failed
/// field rules all become [`AppError::Validation`] (`400 Bad Request`).
///
/// ```rust,ignore
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateUserDto>) {
///     // `body` passed every field rule
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Rejected request body");
            AppError::bad_request("Invalid request body", json!({"reason": rejection.body_text()}))
        })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
