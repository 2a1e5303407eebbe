//! Path id extractor.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde_json::json;

use crate::error::AppError;

/// Positive integer id taken from the single path parameter.
///
/// Accepts decimal digits only. Signs, fractions, zero and values that do
/// not fit in an `i64` are rejected with `400 Bad Request`, so a handler
/// never sees an id the store could not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamId(pub i64);

impl ParamId {
    /// Parses a raw path segment.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let invalid = || {
            AppError::bad_request(
                "Invalid id",
                json!({"id": raw, "reason": "Expected a positive integer"}),
            )
        };

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(invalid()),
        }
    }
}

impl<S> FromRequestParts<S> for ParamId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request("Invalid id", json!({"reason": e.body_text()})))?;

        Self::parse(&raw)
    }
}
