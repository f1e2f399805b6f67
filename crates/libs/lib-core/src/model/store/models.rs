use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
///
/// `password_hash` never leaves the store layer in a serialized form; wire
/// responses are built from the DTO types, which have no hash field.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub link: Option<String>,
    pub profile_img: Option<String>,
    pub cover_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password must already be hashed.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Data structure for updating an existing user.
///
/// All fields are optional - only provided fields will be updated.
#[derive(Debug, Clone, Default)]
pub struct UserForUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub bio: Option<String>,
    pub link: Option<String>,
    pub profile_img: Option<String>,
    pub cover_img: Option<String>,
}

impl UserForUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn full_name(mut self, full_name: String) -> Self {
        self.full_name = Some(full_name);
        self
    }

    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    pub fn bio(mut self, bio: String) -> Self {
        self.bio = Some(bio);
        self
    }

    pub fn link(mut self, link: String) -> Self {
        self.link = Some(link);
        self
    }

    pub fn profile_img(mut self, profile_img: String) -> Self {
        self.profile_img = Some(profile_img);
        self
    }

    pub fn cover_img(mut self, cover_img: String) -> Self {
        self.cover_img = Some(cover_img);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.full_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.bio.is_none()
            && self.link.is_none()
            && self.profile_img.is_none()
            && self.cover_img.is_none()
    }
}

/// Post entity. At least one of `text` and `img` is always present,
/// enforced at the handler boundary.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub text: Option<String>,
    pub img: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Comment on a post.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Notification kinds produced by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Follow,
    Like,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Follow => "follow",
            NotificationKind::Like => "like",
        }
    }
}

/// Notification entity. `kind` holds a [`NotificationKind`] string.
#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
