//! # Post Repository
//!
//! Database access layer for posts, likes, and comments.

use super::models::{Comment, Post};
use super::DbPool;
use sqlx::query_as;

/// Post repository for database operations.
pub struct PostRepository;

impl PostRepository {
    /// Create a new post. The caller guarantees at least one of `text`
    /// and `img` is present.
    pub async fn create(
        pool: &DbPool,
        user_id: i64,
        text: Option<&str>,
        img: Option<&str>,
    ) -> Result<Post, sqlx::Error> {
        let result = sqlx::query("INSERT INTO posts (user_id, text, img) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(text)
            .bind(img)
            .execute(pool)
            .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a post by id.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Post>, sqlx::Error> {
        query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post. Likes and comments go with it (cascade).
    pub async fn delete(pool: &DbPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    // region: --- Likes

    /// Whether `user_id` has liked `post_id`.
    pub async fn is_liked_by(
        pool: &DbPool,
        post_id: i64,
        user_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM post_likes WHERE post_id = ? AND user_id = ?")
                .bind(post_id)
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok(count.0 > 0)
    }

    /// Record a like. Idempotent.
    pub async fn like(pool: &DbPool, post_id: i64, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT OR IGNORE INTO post_likes (post_id, user_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Remove a like if present.
    pub async fn unlike(pool: &DbPool, post_id: i64, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
            .bind(post_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Ids of users who liked `post_id`.
    pub async fn liker_ids(pool: &DbPool, post_id: i64) -> Result<Vec<i64>, sqlx::Error> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT user_id FROM post_likes WHERE post_id = ? ORDER BY created_at")
                .bind(post_id)
                .fetch_all(pool)
                .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    // endregion: --- Likes

    // region: --- Comments

    /// Add a comment to a post.
    pub async fn add_comment(
        pool: &DbPool,
        post_id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<Comment, sqlx::Error> {
        let result = sqlx::query("INSERT INTO comments (post_id, user_id, text) VALUES (?, ?, ?)")
            .bind(post_id)
            .bind(user_id)
            .bind(text)
            .execute(pool)
            .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Comments on a post, oldest first.
    pub async fn comments_of(pool: &DbPool, post_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
        query_as::<_, Comment>(
            "SELECT * FROM comments WHERE post_id = ? ORDER BY created_at, id",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }

    // endregion: --- Comments

    // region: --- Feeds

    /// All posts, newest first.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<Post>, sqlx::Error> {
        query_as::<_, Post>("SELECT * FROM posts ORDER BY created_at DESC, id DESC")
            .fetch_all(pool)
            .await
    }

    /// Posts authored by `user_id`, newest first.
    pub async fn list_by_user(pool: &DbPool, user_id: i64) -> Result<Vec<Post>, sqlx::Error> {
        query_as::<_, Post>(
            "SELECT * FROM posts WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Posts liked by `user_id`, most recently liked first.
    pub async fn list_liked_by(pool: &DbPool, user_id: i64) -> Result<Vec<Post>, sqlx::Error> {
        query_as::<_, Post>(
            r#"
            SELECT p.* FROM posts p
            JOIN post_likes pl ON pl.post_id = p.id
            WHERE pl.user_id = ?
            ORDER BY pl.created_at DESC, p.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Posts authored by users that `user_id` follows, newest first.
    pub async fn list_following_feed(
        pool: &DbPool,
        user_id: i64,
    ) -> Result<Vec<Post>, sqlx::Error> {
        query_as::<_, Post>(
            r#"
            SELECT * FROM posts
            WHERE user_id IN (SELECT followee_id FROM follows WHERE follower_id = ?)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    // endregion: --- Feeds
}
