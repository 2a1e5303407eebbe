//! Handlers for the `/users` resource.
//!
//! Authentication and the admin role check run as route layers before any
//! of these handlers; see [`crate::api::routes::user_routes`]. By the time a
//! handler runs, the id is a positive integer and the body has passed its
//! field rules. Service errors are returned unchanged.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::user::{DeleteUserResponse, UserItem, UserListResponse};
use crate::api::extract::{ParamId, ValidatedJson};
use crate::domain::dto::{CreateUserDto, UpdatePatchUserDto, UpdatePutUserDto};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a user.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "password": "secret1",
///   "birthAt": "1815-12-10",  // optional
///   "role": "admin"           // optional, defaults to "user"
/// }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: User created
/// - **400 Bad Request**: Body failed validation
/// - **409 Conflict**: E-mail already in use
pub async fn create_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserItem>), AppError> {
    let user = state.user_service.create(payload).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Lists every user.
///
/// # Endpoint
///
/// `GET /users`
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, AppError> {
    let users = state.user_service.list().await?;

    Ok(Json(users.into()))
}

/// Returns a single user.
///
/// # Endpoint
///
/// `GET /users/{id}`
///
/// # Response Codes
///
/// - **200 OK**: User found
/// - **400 Bad Request**: Id is not a positive integer
/// - **404 Not Found**: No user with this id
pub async fn show_user_handler(
    State(state): State<AppState>,
    ParamId(id): ParamId,
) -> Result<Json<UserItem>, AppError> {
    tracing::debug!(user_id = id, "Showing user");

    let user = state.user_service.show(id).await?;

    Ok(Json(user.into()))
}

/// Replaces a user's data.
///
/// # Endpoint
///
/// `PUT /users/{id}`
///
/// Takes the same body as [`create_user_handler`]. An omitted `birthAt`
/// clears the stored date; an omitted `role` keeps the current one.
pub async fn update_user_handler(
    State(state): State<AppState>,
    ParamId(id): ParamId,
    ValidatedJson(payload): ValidatedJson<UpdatePutUserDto>,
) -> Result<Json<UserItem>, AppError> {
    let user = state.user_service.update(id, payload).await?;

    Ok(Json(user.into()))
}

/// Changes only the supplied fields of a user.
///
/// # Endpoint
///
/// `PATCH /users/{id}`
///
/// # Request Body
///
/// All fields optional. `"birthAt": null` clears the date.
///
/// ```json
/// { "name": "Ada Lovelace", "birthAt": null }
/// ```
pub async fn update_user_partial_handler(
    State(state): State<AppState>,
    ParamId(id): ParamId,
    ValidatedJson(payload): ValidatedJson<UpdatePatchUserDto>,
) -> Result<Json<UserItem>, AppError> {
    let user = state.user_service.update_partial(id, payload).await?;

    Ok(Json(user.into()))
}

/// Removes a user.
///
/// # Endpoint
///
/// `DELETE /users/{id}`
///
/// # Response
///
/// ```json
/// { "id": 7, "deleted": true }
/// ```
pub async fn delete_user_handler(
    State(state): State<AppState>,
    ParamId(id): ParamId,
) -> Result<Json<DeleteUserResponse>, AppError> {
    state.user_service.delete(id).await?;

    Ok(Json(DeleteUserResponse { id, deleted: true }))
}
