//! # Authentication Handlers
//!
//! Signup, login, logout, and current-user endpoints. These are the only
//! producers of identity tokens: a token is issued exactly when a
//! credential check has passed, and it leaves the server only inside the
//! session cookie.

use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use lib_auth::{hash_password, issue_token, verify_password};
use lib_core::dto::{LoginRequest, MessageResponse, SignupRequest, UserResponse};
use lib_core::model::store::models::UserForCreate;
use lib_core::model::store::UserRepository;
use lib_core::{AppError, Result};
use lib_utils::validation::{validate_email, validate_not_empty};
use tower_cookies::Cookies;
use tracing::{info, instrument};

use crate::middleware::AuthUser;
use crate::server::AppState;
use crate::session::{remove_token_cookie, set_token_cookie};

/// Build the public view of a user, with follow lists populated.
async fn user_response(state: &AppState, user: lib_core::model::store::models::User) -> Result<UserResponse> {
    let followers = UserRepository::followers_of(&state.db, user.id).await?;
    let following = UserRepository::following_of(&state.db, user.id).await?;
    Ok(UserResponse::from_parts(user, followers, following))
}

/// Map a password-hashing failure: a too-short password is the caller's
/// fault, anything else is ours.
fn map_pwd_error(err: lib_auth::pwd::Error) -> AppError {
    match err {
        lib_auth::pwd::Error::TooShort => AppError::InvalidInput(err.to_string()),
        _ => AppError::Internal(err.to_string()),
    }
}

/// Signup handler - creates a new user account and starts a session.
#[instrument(skip(state, cookies, req), fields(username = %req.username))]
pub async fn signup(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    for (value, field) in [
        (&req.username, "Username"),
        (&req.full_name, "Full name"),
        (&req.email, "Email"),
        (&req.password, "Password"),
    ] {
        validate_not_empty(value, field).map_err(AppError::InvalidInput)?;
    }

    validate_email(&req.email).map_err(AppError::InvalidInput)?;

    if UserRepository::find_by_username(&state.db, &req.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    if UserRepository::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let password_hash = hash_password(&req.password).map_err(map_pwd_error)?;

    let user = UserRepository::create(
        &state.db,
        &UserForCreate {
            username: req.username,
            full_name: req.full_name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let token = issue_token(
        &user.id.to_string(),
        &state.config.jwt_secret,
        state.config.token_ttl_days,
    )
    .map_err(|err| AppError::Internal(err.to_string()))?;

    set_token_cookie(&cookies, &token, &state.config);

    info!("[SIGNUP] User created: {} (id: {})", user.username, user.id);

    let body = user_response(&state, user).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// Login handler - authenticates an existing user and starts a session.
///
/// Unknown username and wrong password produce the same response, so a
/// caller cannot probe which one failed.
#[instrument(skip(state, cookies, req), fields(username = %req.username))]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserResponse>> {
    validate_not_empty(&req.username, "Username").map_err(AppError::InvalidInput)?;
    validate_not_empty(&req.password, "Password").map_err(AppError::InvalidInput)?;

    let user = UserRepository::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let is_valid = verify_password(&req.password, &user.password_hash)
        .map_err(|err| AppError::Internal(err.to_string()))?;

    if !is_valid {
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = issue_token(
        &user.id.to_string(),
        &state.config.jwt_secret,
        state.config.token_ttl_days,
    )
    .map_err(|err| AppError::Internal(err.to_string()))?;

    set_token_cookie(&cookies, &token, &state.config);

    info!("[LOGIN] User authenticated: {} (id: {})", user.username, user.id);

    let body = user_response(&state, user).await?;
    Ok(Json(body))
}

/// Logout handler - ends the session by expiring the cookie client-side.
pub async fn logout(cookies: Cookies) -> Json<MessageResponse> {
    remove_token_cookie(&cookies);
    Json(MessageResponse::new("Logged out successfully"))
}

/// Current-user handler - returns the authenticated user's public view.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = UserRepository::find_by_id(&state.db, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let body = user_response(&state, user).await?;
    Ok(Json(body))
}

#[cfg(test)]
mod tests;
