//! # Post DTOs

use crate::model::store::models::{Comment, Post, User};
use lib_utils::time::format_time;
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Post creation payload. Text or image (or both) must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub text: Option<String>,
    pub img: Option<String>,
}

/// Comment creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// A comment with its author populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub user: UserSummary,
    pub text: String,
    pub created_at: String,
}

impl CommentResponse {
    pub fn from_parts(comment: Comment, author: &User) -> Self {
        Self {
            id: comment.id,
            user: UserSummary::from(author),
            text: comment.text,
            created_at: format_time(comment.created_at),
        }
    }
}

/// A post with author, liker ids, and comments populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub user: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub likes: Vec<i64>,
    pub comments: Vec<CommentResponse>,
    pub created_at: String,
}

impl PostResponse {
    pub fn from_parts(
        post: Post,
        author: &User,
        likes: Vec<i64>,
        comments: Vec<CommentResponse>,
    ) -> Self {
        Self {
            id: post.id,
            user: UserSummary::from(author),
            text: post.text,
            img: post.img,
            likes,
            comments,
            created_at: format_time(post.created_at),
        }
    }
}
