//! # Signup Tests

use super::*;

#[tokio::test]
async fn test_signup_success() {
    let app = test_app(setup_test_db().await, test_config());

    let response = post_json(
        &app,
        "/api/auth/signup",
        &signup_request("alice", "alice@example.com"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = session_cookie(&response).expect("signup should set the session cookie");
    assert!(cookie.starts_with("token="));

    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["followers"], serde_json::json!([]));
    assert_eq!(body["following"], serde_json::json!([]));
}

#[tokio::test]
async fn test_signup_response_never_contains_credential() {
    let app = test_app(setup_test_db().await, test_config());

    let response = post_json(
        &app,
        "/api/auth/signup",
        &signup_request("alice", "alice@example.com"),
    )
    .await;

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let raw = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!raw.contains("password"));
}

#[tokio::test]
async fn test_signup_missing_field() {
    let app = test_app(setup_test_db().await, test_config());

    let mut req = signup_request("alice", "alice@example.com");
    req.full_name = "".to_string();

    let response = post_json(&app, "/api/auth/signup", &req).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = test_app(setup_test_db().await, test_config());

    let response = post_json(
        &app,
        "/api/auth/signup",
        &signup_request("alice", "not-an-email"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid email format");
}

#[tokio::test]
async fn test_signup_short_password() {
    let app = test_app(setup_test_db().await, test_config());

    let mut req = signup_request("alice", "alice@example.com");
    req.password = "five5".to_string();

    let response = post_json(&app, "/api/auth/signup", &req).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Password must be at least 6 characters long");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = test_app(setup_test_db().await, test_config());

    signup_user(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/auth/signup",
        &signup_request("alice", "other@example.com"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Username already exists");
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = test_app(setup_test_db().await, test_config());

    signup_user(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/auth/signup",
        &signup_request("alice2", "alice@example.com"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Email already exists");
}
