//! # Auth Handler Tests
//!
//! Test suite for the authentication endpoints, driven through the full
//! router (middleware included) with `oneshot` requests.

mod login;
mod signup;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use lib_core::dto::{LoginRequest, SignupRequest};
use lib_core::{Config, DbPool};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use crate::server::{routes, AppState};

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";

/// Setup test database with the full schema.
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::raw_sql(
        r#"
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            bio TEXT,
            link TEXT,
            profile_img TEXT,
            cover_img TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE follows (
            follower_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            followee_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (follower_id, followee_id)
        );

        CREATE TABLE posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            text TEXT,
            img TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE post_likes (
            post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (post_id, user_id)
        );

        CREATE TABLE comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            post_id INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            text TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE notifications (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            from_user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            to_user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            kind TEXT NOT NULL CHECK (kind IN ('follow', 'like')),
            read BOOLEAN NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create schema");

    pool
}

/// Create test config.
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_days: 15,
        environment: "development".to_string(),
    }
}

/// Create test app with the real routes and middleware.
pub fn test_app(pool: DbPool, config: Config) -> Router {
    routes(AppState { db: pool, config })
}

pub fn signup_request(username: &str, email: &str) -> SignupRequest {
    SignupRequest {
        username: username.to_string(),
        full_name: format!("{username} Example"),
        email: email.to_string(),
        password: "hunter22".to_string(),
    }
}

pub fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// POST a JSON body to the app.
pub async fn post_json<T: serde::Serialize>(app: &Router, uri: &str, body: &T) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// GET with an optional session cookie.
pub async fn get_with_cookie(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Pull the `token=...` pair out of a response's Set-Cookie header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?;
    pair.starts_with("token=").then(|| pair.to_string())
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Signup a user and return (session cookie, response body).
pub async fn signup_user(app: &Router, username: &str) -> (String, serde_json::Value) {
    let response = post_json(
        app,
        "/api/auth/signup",
        &signup_request(username, &format!("{username}@example.com")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = session_cookie(&response).expect("signup should set the session cookie");
    let body = body_json(response).await;
    (cookie, body)
}
