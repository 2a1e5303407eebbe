#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{NaiveDate, TimeZone, Utc};
use mockall::mock;
use serde_json::json;
use std::sync::Arc;
use users_api::api::routes::user_routes;
use users_api::application::services::{Authenticator, Identity, UserService};
use users_api::domain::dto::{CreateUserDto, UpdatePatchUserDto, UpdatePutUserDto};
use users_api::domain::entities::{Role, User};
use users_api::error::AppError;
use users_api::state::AppState;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";

mock! {
    pub Users {}

    #[async_trait]
    impl UserService for Users {
        async fn create(&self, data: CreateUserDto) -> Result<User, AppError>;
        async fn list(&self) -> Result<Vec<User>, AppError>;
        async fn show(&self, id: i64) -> Result<User, AppError>;
        async fn update(&self, id: i64, data: UpdatePutUserDto) -> Result<User, AppError>;
        async fn update_partial(&self, id: i64, data: UpdatePatchUserDto) -> Result<User, AppError>;
        async fn delete(&self, id: i64) -> Result<(), AppError>;
    }
}

mock! {
    pub Auth {}

    #[async_trait]
    impl Authenticator for Auth {
        async fn authenticate(&self, token: &str) -> Result<Identity, AppError>;
    }
}

pub fn identity(role: Role) -> Identity {
    Identity {
        user_id: match role {
            Role::Admin => 1,
            Role::User => 2,
        },
        email: format!("{}@example.com", role.as_str()),
        role,
    }
}

/// Accepts [`ADMIN_TOKEN`] and [`USER_TOKEN`], rejects everything else.
pub fn mock_authenticator() -> MockAuth {
    let mut auth = MockAuth::new();

    auth.expect_authenticate().returning(|token| match token {
        ADMIN_TOKEN => Ok(identity(Role::Admin)),
        USER_TOKEN => Ok(identity(Role::User)),
        _ => Err(AppError::unauthorized(
            "Unauthorized",
            json!({"reason": "Invalid or expired token"}),
        )),
    });

    auth
}

pub fn sample_user(id: i64) -> User {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

    User {
        id,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password_hash: "$2b$04$not-a-real-hash".to_string(),
        birth_at: NaiveDate::from_ymd_opt(1815, 12, 10),
        role: Role::User,
        created_at,
        updated_at: created_at,
    }
}

pub fn create_test_state(users: MockUsers) -> AppState {
    AppState::new(Arc::new(users), Arc::new(mock_authenticator()))
}

/// Serves the guarded `/users` routes over a mocked service.
pub fn make_server(users: MockUsers) -> TestServer {
    let state = create_test_state(users);
    let app = Router::new()
        .merge(user_routes(state.clone()))
        .with_state(state);

    TestServer::new(app).unwrap()
}
