//! # Authentication Middleware
//!
//! Request guard for protected routes. Per request it walks
//! extract -> verify -> load: the session cookie is read, its token
//! verified against the signing secret, and the referenced user loaded
//! from the store. Success attaches an immutable [`AuthUser`] to the
//! request's extensions; any failure short-circuits with an
//! [`AuthError`] before the handler runs.
//!
//! Handlers extract the identity with `Extension<AuthUser>`:
//!
//! ```rust,ignore
//! async fn me(Extension(auth): Extension<AuthUser>) -> String {
//!     format!("Hello, {}!", auth.username)
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use lib_auth::verify_token;
use lib_core::model::store::UserRepository;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::server::AppState;
use crate::session::token_from_cookies;
use tower_cookies::Cookies;

/// Identity of the authenticated caller.
///
/// Immutable, request-scoped, and built fresh for every request; it never
/// carries the credential hash.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// Why a request was rejected before reaching its handler.
///
/// The kinds stay distinct here and in the logs. On the wire, the three
/// credential kinds collapse into one generic 401 body so a caller cannot
/// probe which check failed; `Internal` maps to a generic 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No token presented.
    NoCredential,
    /// Token malformed, forged, or expired.
    BadCredential,
    /// Token valid, but the referenced user no longer exists.
    IdentityGone,
    /// Store failure while resolving the identity.
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::NoCredential | AuthError::BadCredential | AuthError::IdentityGone => {
                (StatusCode::UNAUTHORIZED, "Not authorized")
            }
            AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Server error"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Authentication middleware for protected routes.
///
/// No identity lookup happens until the token has been verified, so
/// anonymous or forged requests never touch the store. A lookup failure
/// is surfaced as `Internal` and not retried.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let raw_token = token_from_cookies(&cookies).ok_or_else(|| {
        debug!("[AUTH] No session cookie presented");
        AuthError::NoCredential
    })?;

    let subject = verify_token(&raw_token, &state.config.jwt_secret).map_err(|err| {
        warn!("[AUTH] Token rejected: {err}");
        AuthError::BadCredential
    })?;

    // Subjects are issued as decimal user ids; anything else was not
    // issued by us.
    let user_id: i64 = subject.parse().map_err(|_| {
        warn!("[AUTH] Token subject is not a user id");
        AuthError::BadCredential
    })?;

    let user = UserRepository::find_by_id(&state.db, user_id)
        .await
        .map_err(|err| {
            error!("[AUTH] Identity lookup failed: {err}");
            AuthError::Internal
        })?
        .ok_or_else(|| {
            warn!("[AUTH] Token subject {user_id} no longer exists");
            AuthError::IdentityGone
        })?;

    debug!("[AUTH] Authenticated user: {} (id: {})", user.username, user.id);

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(req).await)
}
