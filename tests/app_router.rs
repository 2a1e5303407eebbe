mod common;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use common::{ADMIN_TOKEN, MockUsers, sample_user};
use std::net::SocketAddr;
use tower::ServiceExt;
use users_api::routes::app_router;

fn request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let mut req = builder.body(Body::empty()).unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([198, 51, 100, 7], 40000))));
    req
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app_router(common::create_test_state(MockUsers::new()), false);

    let response = app.oneshot(request("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let mut users = MockUsers::new();
    users
        .expect_show()
        .withf(|id| *id == 3)
        .times(1)
        .returning(|id| Ok(sample_user(id)));

    let app = app_router(common::create_test_state(users), false);

    let response = app
        .oneshot(request("/users/3/", Some(ADMIN_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_users_are_guarded() {
    let app = app_router(common::create_test_state(MockUsers::new()), false);

    let response = app.oneshot(request("/users", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = app_router(common::create_test_state(MockUsers::new()), false);

    let response = app.oneshot(request("/nope", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_are_rate_limited_per_client() {
    let app = app_router(common::create_test_state(MockUsers::new()), false);

    // Burst of 10, then throttled.
    for _ in 0..10 {
        let response = app.clone().oneshot(request("/users", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = app.clone().oneshot(request("/users", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Health is outside the limiter.
    let response = app.oneshot(request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
