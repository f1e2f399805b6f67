//! # Login Tests

use super::*;

#[tokio::test]
async fn test_login_success() {
    let app = test_app(setup_test_db().await, test_config());
    signup_user(&app, "alice").await;

    let response = post_json(&app, "/api/auth/login", &login_request("alice", "hunter22")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("login should set the session cookie");
    assert!(cookie.starts_with("token="));

    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = test_app(setup_test_db().await, test_config());
    signup_user(&app, "alice").await;

    let response =
        post_json(&app, "/api/auth/login", &login_request("alice", "wrong-password")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = test_app(setup_test_db().await, test_config());

    let response = post_json(&app, "/api/auth/login", &login_request("nobody", "hunter22")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    // Same message as the wrong-password case: no probing which failed.
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_missing_password() {
    let app = test_app(setup_test_db().await, test_config());
    signup_user(&app, "alice").await;

    let response = post_json(&app, "/api/auth/login", &login_request("alice", "")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
