//! Role-based access guard.
//!
//! Must run after [`super::auth::layer`], which stores the caller's
//! [`Identity`] in the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::application::services::Identity;
use crate::domain::entities::Role;
use crate::error::AppError;

/// Roles allowed through the guard.
#[derive(Debug, Clone, Copy)]
pub struct RequiredRoles(pub &'static [Role]);

/// Admin-only access.
pub const ADMIN_ONLY: RequiredRoles = RequiredRoles(&[Role::Admin]);

impl RequiredRoles {
    pub fn allows(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

/// Rejects callers whose role is not in the required set.
///
/// # Errors
///
/// - `401 Unauthorized` if no identity was attached to the request
/// - `403 Forbidden` if the identity's role is not allowed
///
/// # Example
///
/// ```rust,ignore
/// Router::new()
///     .route("/users", get(list_users_handler))
///     .route_layer(middleware::from_fn_with_state(roles::ADMIN_ONLY, roles::layer))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(required): State<RequiredRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = req.extensions().get::<Identity>().ok_or_else(|| {
        AppError::unauthorized("Unauthorized", json!({"reason": "Request is not authenticated"}))
    })?;

    if !required.allows(identity.role) {
        tracing::warn!(
            user_id = identity.user_id,
            role = %identity.role,
            path = %req.uri().path(),
            "Access denied"
        );
        metrics::counter!("auth_rejections_total", "reason" => "forbidden").increment(1);

        return Err(AppError::forbidden(
            "Forbidden",
            json!({
                "role": identity.role,
                "required": required.0,
            }),
        ));
    }

    Ok(next.run(req).await)
}
