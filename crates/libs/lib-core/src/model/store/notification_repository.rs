//! # Notification Repository
//!
//! Database access layer for follow/like notifications.

use super::models::{Notification, NotificationKind};
use super::DbPool;
use sqlx::query_as;

/// Notification repository for database operations.
pub struct NotificationRepository;

impl NotificationRepository {
    /// Record a notification from one user to another.
    pub async fn create(
        pool: &DbPool,
        from_user_id: i64,
        to_user_id: i64,
        kind: NotificationKind,
    ) -> Result<Notification, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO notifications (from_user_id, to_user_id, kind) VALUES (?, ?, ?)",
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(kind.as_str())
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Notification>("SELECT * FROM notifications WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Notifications addressed to `user_id`, newest first.
    pub async fn list_for(pool: &DbPool, user_id: i64) -> Result<Vec<Notification>, sqlx::Error> {
        query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE to_user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Mark every notification addressed to `user_id` as read.
    pub async fn mark_read_for(pool: &DbPool, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE notifications SET read = 1 WHERE to_user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Delete every notification addressed to `user_id`; returns the count.
    pub async fn delete_for(pool: &DbPool, user_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE to_user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
