//! # User Handlers
//!
//! Profiles, suggestions, the follow graph, and profile updates. All
//! routes here are protected; the acting identity comes from the auth
//! middleware.

use axum::extract::{Extension, Json, Path, State};
use lib_auth::{hash_password, verify_password};
use lib_core::dto::{MessageResponse, UpdateUserRequest, UserResponse, UserSummary};
use lib_core::model::store::models::{NotificationKind, UserForUpdate};
use lib_core::model::store::{NotificationRepository, UserRepository};
use lib_core::{AppError, Result};
use lib_utils::validation::validate_email;
use tracing::info;

use crate::middleware::AuthUser;
use crate::server::AppState;

/// How many suggestions `GET /api/users/suggested` returns at most.
const SUGGESTED_LIMIT: i64 = 4;

async fn user_response(
    state: &AppState,
    user: lib_core::model::store::models::User,
) -> Result<UserResponse> {
    let followers = UserRepository::followers_of(&state.db, user.id).await?;
    let following = UserRepository::following_of(&state.db, user.id).await?;
    Ok(UserResponse::from_parts(user, followers, following))
}

/// `GET /api/users/profile/{username}` - public profile by username.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = UserRepository::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let body = user_response(&state, user).await?;
    Ok(Json(body))
}

/// `GET /api/users/suggested` - users the caller might want to follow.
///
/// Excludes the caller and everyone they already follow.
pub async fn get_suggested(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<UserSummary>>> {
    let suggested = UserRepository::suggested_for(&state.db, auth.id, SUGGESTED_LIMIT).await?;
    let body = suggested.iter().map(UserSummary::from).collect();
    Ok(Json(body))
}

/// `POST /api/users/follow/{id}` - toggle following the given user.
///
/// Following produces a notification for the target; unfollowing is
/// silent.
pub async fn follow_unfollow(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    if id == auth.id {
        return Err(AppError::InvalidInput(
            "You cannot follow/unfollow yourself".to_string(),
        ));
    }

    let target = UserRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let is_following = UserRepository::is_following(&state.db, auth.id, target.id).await?;

    if is_following {
        UserRepository::unfollow(&state.db, auth.id, target.id).await?;
        info!("[FOLLOW] {} unfollowed {}", auth.id, target.id);
        Ok(Json(MessageResponse::new("Unfollowed user")))
    } else {
        UserRepository::follow(&state.db, auth.id, target.id).await?;
        NotificationRepository::create(&state.db, auth.id, target.id, NotificationKind::Follow)
            .await?;
        info!("[FOLLOW] {} followed {}", auth.id, target.id);
        Ok(Json(MessageResponse::new("Followed user")))
    }
}

/// `POST /api/users/update` - update the caller's profile.
///
/// A password change requires the current and the new password together;
/// the current one is re-verified before anything is written.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let user = UserRepository::find_by_id(&state.db, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut update = UserForUpdate::new();

    match (&req.current_password, &req.new_password) {
        (None, None) => {}
        (Some(current), Some(new)) => {
            let is_valid = verify_password(current, &user.password_hash)
                .map_err(|err| AppError::Internal(err.to_string()))?;
            if !is_valid {
                return Err(AppError::Unauthorized("Incorrect password".to_string()));
            }

            let password_hash = hash_password(new).map_err(|err| match err {
                lib_auth::pwd::Error::TooShort => AppError::InvalidInput(err.to_string()),
                _ => AppError::Internal(err.to_string()),
            })?;
            update = update.password_hash(password_hash);
        }
        _ => {
            return Err(AppError::InvalidInput(
                "Both current and new password are required".to_string(),
            ));
        }
    }

    if let Some(username) = req.username {
        if username != user.username {
            if UserRepository::find_by_username(&state.db, &username).await?.is_some() {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
            update = update.username(username);
        }
    }

    if let Some(email) = req.email {
        if email != user.email {
            validate_email(&email).map_err(AppError::InvalidInput)?;
            if UserRepository::find_by_email(&state.db, &email).await?.is_some() {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
            update = update.email(email);
        }
    }

    if let Some(full_name) = req.full_name {
        update = update.full_name(full_name);
    }
    if let Some(bio) = req.bio {
        update = update.bio(bio);
    }
    if let Some(link) = req.link {
        update = update.link(link);
    }
    // Image values are opaque URLs; they are stored as given.
    if let Some(profile_img) = req.profile_img {
        update = update.profile_img(profile_img);
    }
    if let Some(cover_img) = req.cover_img {
        update = update.cover_img(cover_img);
    }

    let updated = UserRepository::update(&state.db, user.id, update).await?;

    let body = user_response(&state, updated).await?;
    Ok(Json(body))
}
