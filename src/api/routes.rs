//! API route configuration.
//!
//! Every `/users` endpoint requires an authenticated caller holding the
//! admin role.

use crate::api::handlers::{
    create_user_handler, delete_user_handler, list_users_handler, show_user_handler,
    update_user_handler, update_user_partial_handler,
};
use crate::api::middleware::{auth, roles};
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

/// User management routes with their guards applied.
///
/// # Endpoints
///
/// - `POST   /users`       - Create a user
/// - `GET    /users`       - List users
/// - `GET    /users/{id}`  - Show a user
/// - `PUT    /users/{id}`  - Replace a user's data
/// - `PATCH  /users/{id}`  - Change some fields of a user
/// - `DELETE /users/{id}`  - Remove a user
///
/// # Guard Order
///
/// Layers added later run first, so each request goes through
/// authentication, then the role check, then id and body extraction. An
/// anonymous caller gets `401` and a non-admin gets `403` before the id or
/// body is inspected.
pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/{id}",
            get(show_user_handler)
                .put(update_user_handler)
                .patch(update_user_partial_handler)
                .delete(delete_user_handler),
        )
        .route_layer(middleware::from_fn_with_state(roles::ADMIN_ONLY, roles::layer))
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}
