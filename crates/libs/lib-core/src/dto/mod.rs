//! # Data Transfer Objects
//!
//! Request and response structures for the HTTP surface. All DTOs use
//! snake_case field names in JSON (default serde behavior). None of the
//! response types carries a password hash field, so credential material
//! cannot leak through serialization.

pub mod auth;
pub mod notification;
pub mod post;
pub mod user;

// Re-export commonly used types
pub use auth::{ErrorResponse, LoginRequest, MessageResponse, SignupRequest};
pub use notification::NotificationResponse;
pub use post::{CommentRequest, CommentResponse, CreatePostRequest, PostResponse};
pub use user::{UpdateUserRequest, UserResponse, UserSummary};
