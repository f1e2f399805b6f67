//! # User Repository
//!
//! Database access layer for users and the follow graph.
//!
//! Implements the repository pattern over plain SQL; all methods are async
//! and return `Result` for proper error handling.

use super::models::{User, UserForCreate, UserForUpdate};
use super::DbPool;
use sqlx::query_as;

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by id.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their username.
    pub async fn find_by_username(
        pool: &DbPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their email address.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user.
    ///
    /// The password in `user_data` must already be hashed. Uniqueness of
    /// username and email is enforced by the schema; a violation surfaces
    /// as a database error.
    pub async fn create(pool: &DbPool, user_data: &UserForCreate) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (username, full_name, email, password_hash) VALUES (?, ?, ?, ?)",
        )
        .bind(&user_data.username)
        .bind(&user_data.full_name)
        .bind(&user_data.email)
        .bind(&user_data.password_hash)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Update an existing user. Only fields that are `Some` are written.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        user_data: UserForUpdate,
    ) -> Result<User, sqlx::Error> {
        if user_data.is_empty() {
            return query_as::<_, User>("SELECT * FROM users WHERE id = ?")
                .bind(id)
                .fetch_one(pool)
                .await;
        }

        let mut updates = Vec::new();

        if user_data.username.is_some() {
            updates.push("username = ?");
        }
        if user_data.full_name.is_some() {
            updates.push("full_name = ?");
        }
        if user_data.email.is_some() {
            updates.push("email = ?");
        }
        if user_data.password_hash.is_some() {
            updates.push("password_hash = ?");
        }
        if user_data.bio.is_some() {
            updates.push("bio = ?");
        }
        if user_data.link.is_some() {
            updates.push("link = ?");
        }
        if user_data.profile_img.is_some() {
            updates.push("profile_img = ?");
        }
        if user_data.cover_img.is_some() {
            updates.push("cover_img = ?");
        }

        updates.push("updated_at = CURRENT_TIMESTAMP");
        let query_str = format!("UPDATE users SET {} WHERE id = ?", updates.join(", "));

        let mut query = sqlx::query(&query_str);

        if let Some(ref username) = user_data.username {
            query = query.bind(username);
        }
        if let Some(ref full_name) = user_data.full_name {
            query = query.bind(full_name);
        }
        if let Some(ref email) = user_data.email {
            query = query.bind(email);
        }
        if let Some(ref password_hash) = user_data.password_hash {
            query = query.bind(password_hash);
        }
        if let Some(ref bio) = user_data.bio {
            query = query.bind(bio);
        }
        if let Some(ref link) = user_data.link {
            query = query.bind(link);
        }
        if let Some(ref profile_img) = user_data.profile_img {
            query = query.bind(profile_img);
        }
        if let Some(ref cover_img) = user_data.cover_img {
            query = query.bind(cover_img);
        }

        query.bind(id).execute(pool).await?;

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    // region: --- Follow graph

    /// Whether `follower_id` currently follows `followee_id`.
    pub async fn is_following(
        pool: &DbPool,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM follows WHERE follower_id = ? AND followee_id = ?",
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Add a follow edge. Idempotent: re-following is a no-op.
    pub async fn follow(
        pool: &DbPool,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT OR IGNORE INTO follows (follower_id, followee_id) VALUES (?, ?)",
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Remove a follow edge if present.
    pub async fn unfollow(
        pool: &DbPool,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followee_id = ?")
            .bind(follower_id)
            .bind(followee_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Ids of users following `user_id`.
    pub async fn followers_of(pool: &DbPool, user_id: i64) -> Result<Vec<i64>, sqlx::Error> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT follower_id FROM follows WHERE followee_id = ? ORDER BY created_at")
                .bind(user_id)
                .fetch_all(pool)
                .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Ids of users that `user_id` follows.
    pub async fn following_of(pool: &DbPool, user_id: i64) -> Result<Vec<i64>, sqlx::Error> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT followee_id FROM follows WHERE follower_id = ? ORDER BY created_at")
                .bind(user_id)
                .fetch_all(pool)
                .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Random sample of users that `user_id` does not follow yet
    /// (excluding `user_id` itself).
    pub async fn suggested_for(
        pool: &DbPool,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE id != ?
              AND id NOT IN (SELECT followee_id FROM follows WHERE follower_id = ?)
            ORDER BY RANDOM()
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    // endregion: --- Follow graph
}
