//! # Notification Handlers
//!
//! Listing (which marks everything read) and bulk deletion of the
//! caller's notifications. All routes here are protected.

use std::collections::HashMap;

use axum::extract::{Extension, Json, State};
use lib_core::dto::{MessageResponse, NotificationResponse};
use lib_core::model::store::models::User;
use lib_core::model::store::{NotificationRepository, UserRepository};
use lib_core::{AppError, Result};
use tracing::info;

use crate::middleware::AuthUser;
use crate::server::AppState;

/// `GET /api/notifications` - the caller's notifications, newest first.
///
/// Fetching marks them all read; the response still shows the read state
/// as it was before this call.
pub async fn get_notifications(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<NotificationResponse>>> {
    let notifications = NotificationRepository::list_for(&state.db, auth.id).await?;
    NotificationRepository::mark_read_for(&state.db, auth.id).await?;

    let mut senders: HashMap<i64, User> = HashMap::new();
    let mut body = Vec::with_capacity(notifications.len());

    for notification in notifications {
        let sender = match senders.get(&notification.from_user_id) {
            Some(user) => user.clone(),
            None => {
                let user = UserRepository::find_by_id(&state.db, notification.from_user_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal(format!(
                            "Notification sender {} missing",
                            notification.from_user_id
                        ))
                    })?;
                senders.insert(notification.from_user_id, user.clone());
                user
            }
        };

        body.push(NotificationResponse::from_parts(notification, &sender));
    }

    Ok(Json(body))
}

/// `DELETE /api/notifications` - delete all of the caller's
/// notifications.
pub async fn delete_notifications(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MessageResponse>> {
    let deleted = NotificationRepository::delete_for(&state.db, auth.id).await?;
    info!("[NOTIFICATIONS] Deleted {} for user {}", deleted, auth.id);

    Ok(Json(MessageResponse::new("Notifications deleted successfully")))
}
