//! # Session Cookie
//!
//! Binds the identity token to the transport. The token travels in a
//! cookie named `token` with `HttpOnly` and `SameSite=Strict` set, and
//! `Secure` outside development mode. The cookie's `Max-Age` comes from
//! the same [`Config::token_ttl_days`] the token codec uses, so the cookie
//! can never outlive (or die before) the token it carries.
//!
//! Extraction is infallible by design: a request without the cookie is
//! simply anonymous, which the auth middleware turns into its own
//! rejection.

use lib_core::Config;
use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

/// Attach the token to the response as the session cookie.
pub fn set_token_cookie(cookies: &Cookies, token: &str, config: &Config) {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token.to_string());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_secure(config.is_production());
    cookie.set_max_age(Duration::days(config.token_ttl_days));
    cookie.set_path("/");
    cookies.add(cookie);
}

/// Clear the session cookie: empty value, immediate expiry on the client.
pub fn remove_token_cookie(cookies: &Cookies) {
    let mut cookie = Cookie::new(TOKEN_COOKIE, "");
    cookie.set_http_only(true);
    cookie.set_max_age(Duration::ZERO);
    cookie.set_path("/");
    cookies.add(cookie);
}

/// Read the raw token from the incoming request, if the client sent one.
pub fn token_from_cookies(cookies: &Cookies) -> Option<String> {
    cookies.get(TOKEN_COOKIE).map(|c| c.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::State;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;
    use tower_cookies::CookieManagerLayer;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret-key-must-be-at-least-32-chars-long!".to_string(),
            token_ttl_days: 15,
            environment: "development".to_string(),
        }
    }

    fn test_app(config: Config) -> Router {
        Router::new()
            .route(
                "/set",
                get(|State(config): State<Config>, cookies: Cookies| async move {
                    set_token_cookie(&cookies, "aaa.bbb.ccc", &config);
                    StatusCode::OK
                }),
            )
            .route(
                "/clear",
                get(|cookies: Cookies| async move {
                    remove_token_cookie(&cookies);
                    StatusCode::OK
                }),
            )
            .route(
                "/read",
                get(|cookies: Cookies| async move {
                    token_from_cookies(&cookies).unwrap_or_else(|| "absent".to_string())
                }),
            )
            .layer(CookieManagerLayer::new())
            .with_state(config)
    }

    async fn get_set_cookie(app: Router, uri: &str) -> String {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("response should set a cookie")
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_set_cookie_attributes() {
        let set_cookie = get_set_cookie(test_app(test_config()), "/set").await;

        assert!(set_cookie.starts_with("token=aaa.bbb.ccc"));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Strict"));
        // 15 days in seconds.
        assert!(set_cookie.contains("Max-Age=1296000"));
        // Development mode: no Secure attribute.
        assert!(!set_cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_secure_attribute_in_production() {
        let mut config = test_config();
        config.environment = "production".to_string();

        let set_cookie = get_set_cookie(test_app(config), "/set").await;
        assert!(set_cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_clear_cookie_expires_immediately() {
        let set_cookie = get_set_cookie(test_app(test_config()), "/clear").await;

        assert!(set_cookie.starts_with("token=;") || set_cookie.starts_with("token=\"\""));
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_round_trip_is_byte_exact() {
        let token = "eyJh.eyJz.c2ln";
        let response = test_app(test_config())
            .oneshot(
                Request::builder()
                    .uri("/read")
                    .header(header::COOKIE, format!("token={token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], token.as_bytes());
    }

    #[tokio::test]
    async fn test_extract_absent_is_not_an_error() {
        let response = test_app(test_config())
            .oneshot(Request::builder().uri("/read").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"absent");
    }
}
