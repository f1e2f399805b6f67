//! # Notification DTOs

use crate::model::store::models::{Notification, User};
use lib_utils::time::format_time;
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// A notification with its sender populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: i64,
    pub from: UserSummary,
    pub kind: String,
    pub read: bool,
    pub created_at: String,
}

impl NotificationResponse {
    pub fn from_parts(notification: Notification, sender: &User) -> Self {
        Self {
            id: notification.id,
            from: UserSummary::from(sender),
            kind: notification.kind,
            read: notification.read,
            created_at: format_time(notification.created_at),
        }
    }
}
