//! # User DTOs

use crate::model::store::models::User;
use lib_utils::time::format_time;
use serde::{Deserialize, Serialize};

/// Public view of a user: everything except the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_img: Option<String>,
    pub followers: Vec<i64>,
    pub following: Vec<i64>,
    pub created_at: String,
}

impl UserResponse {
    /// Build the public view from a row and its follow lists.
    pub fn from_parts(user: User, followers: Vec<i64>, following: Vec<i64>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            bio: user.bio,
            link: user.link,
            profile_img: user.profile_img,
            cover_img: user.cover_img,
            followers,
            following,
            created_at: format_time(user.created_at),
        }
    }
}

/// Compact user reference embedded in posts, comments, and notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_img: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            profile_img: user.profile_img.clone(),
        }
    }
}

/// Profile update payload. Every field optional; password change requires
/// `current_password` and `new_password` together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub link: Option<String>,
    pub profile_img: Option<String>,
    pub cover_img: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}
