//! # Post Handlers
//!
//! Post creation and deletion, like toggling, comments, and the feed
//! queries. All routes here are protected.

use std::collections::HashMap;

use axum::extract::{Extension, Json, Path, State};
use axum::http::StatusCode;
use lib_core::dto::{
    CommentRequest, CommentResponse, CreatePostRequest, MessageResponse, PostResponse,
};
use lib_core::model::store::models::{NotificationKind, Post, User};
use lib_core::model::store::{NotificationRepository, PostRepository, UserRepository};
use lib_core::{AppError, DbPool, Result};
use lib_utils::validation::validate_not_empty;
use tracing::info;

use crate::middleware::AuthUser;
use crate::server::AppState;

/// Load a user row, caching it for the duration of one response build.
async fn author_for(
    pool: &DbPool,
    cache: &mut HashMap<i64, User>,
    user_id: i64,
) -> Result<User> {
    if let Some(user) = cache.get(&user_id) {
        return Ok(user.clone());
    }

    let user = UserRepository::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Post author {user_id} missing")))?;
    cache.insert(user_id, user.clone());
    Ok(user)
}

/// Populate a list of posts: author, liker ids, and comments with their
/// authors.
async fn populate_posts(pool: &DbPool, posts: Vec<Post>) -> Result<Vec<PostResponse>> {
    let mut authors: HashMap<i64, User> = HashMap::new();
    let mut out = Vec::with_capacity(posts.len());

    for post in posts {
        let likes = PostRepository::liker_ids(pool, post.id).await?;

        let mut comments = Vec::new();
        for comment in PostRepository::comments_of(pool, post.id).await? {
            let author = author_for(pool, &mut authors, comment.user_id).await?;
            comments.push(CommentResponse::from_parts(comment, &author));
        }

        let author = author_for(pool, &mut authors, post.user_id).await?;
        out.push(PostResponse::from_parts(post, &author, likes, comments));
    }

    Ok(out)
}

/// `POST /api/posts/create` - create a post with text, an image URL, or
/// both.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>)> {
    let has_text = req.text.as_deref().is_some_and(|t| !t.trim().is_empty());
    let has_img = req.img.as_deref().is_some_and(|i| !i.is_empty());

    if !has_text && !has_img {
        return Err(AppError::InvalidInput(
            "Post must have text or image".to_string(),
        ));
    }

    let author = UserRepository::find_by_id(&state.db, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let post = PostRepository::create(
        &state.db,
        auth.id,
        req.text.as_deref().filter(|t| !t.trim().is_empty()),
        req.img.as_deref().filter(|i| !i.is_empty()),
    )
    .await?;

    info!("[POST] {} created post {}", auth.username, post.id);

    let body = PostResponse::from_parts(post, &author, Vec::new(), Vec::new());
    Ok((StatusCode::CREATED, Json(body)))
}

/// `DELETE /api/posts/{id}` - delete one of the caller's own posts.
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let post = PostRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.user_id != auth.id {
        return Err(AppError::Unauthorized(
            "You are not authorized to delete this post".to_string(),
        ));
    }

    PostRepository::delete(&state.db, post.id).await?;

    info!("[POST] {} deleted post {}", auth.username, post.id);

    Ok(Json(MessageResponse::new("Post deleted successfully")))
}

/// `POST /api/posts/like/{id}` - toggle a like; returns the post's
/// current liker ids.
///
/// Liking notifies the post's author; unliking is silent.
pub async fn like_unlike_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<i64>>> {
    let post = PostRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let is_liked = PostRepository::is_liked_by(&state.db, post.id, auth.id).await?;

    if is_liked {
        PostRepository::unlike(&state.db, post.id, auth.id).await?;
    } else {
        PostRepository::like(&state.db, post.id, auth.id).await?;
        NotificationRepository::create(&state.db, auth.id, post.user_id, NotificationKind::Like)
            .await?;
    }

    let likes = PostRepository::liker_ids(&state.db, post.id).await?;
    Ok(Json(likes))
}

/// `POST /api/posts/comment/{id}` - comment on a post.
pub async fn comment_on_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>)> {
    validate_not_empty(&req.text, "Comment").map_err(AppError::InvalidInput)?;

    let post = PostRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let author = UserRepository::find_by_id(&state.db, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let comment = PostRepository::add_comment(&state.db, post.id, auth.id, &req.text).await?;

    let body = CommentResponse::from_parts(comment, &author);
    Ok((StatusCode::CREATED, Json(body)))
}

/// `GET /api/posts/all` - every post, newest first.
pub async fn get_all_posts(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>> {
    let posts = PostRepository::list_all(&state.db).await?;
    let body = populate_posts(&state.db, posts).await?;
    Ok(Json(body))
}

/// `GET /api/posts/following` - posts from users the caller follows.
pub async fn get_following_posts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<PostResponse>>> {
    let posts = PostRepository::list_following_feed(&state.db, auth.id).await?;
    let body = populate_posts(&state.db, posts).await?;
    Ok(Json(body))
}

/// `GET /api/posts/user/{username}` - posts authored by the given user.
pub async fn get_user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<PostResponse>>> {
    let user = UserRepository::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let posts = PostRepository::list_by_user(&state.db, user.id).await?;
    let body = populate_posts(&state.db, posts).await?;
    Ok(Json(body))
}

/// `GET /api/posts/likes/{id}` - posts liked by the given user.
pub async fn get_liked_posts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<PostResponse>>> {
    let user = UserRepository::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let posts = PostRepository::list_liked_by(&state.db, user.id).await?;
    let body = populate_posts(&state.db, posts).await?;
    Ok(Json(body))
}
