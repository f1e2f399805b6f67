//! # Authentication DTOs
//!
//! Request and response structures for the auth endpoints.
//!
//! - `POST /api/auth/signup` — [`SignupRequest`] -> public user
//! - `POST /api/auth/login` — [`LoginRequest`] -> public user
//! - `POST /api/auth/logout` — [`MessageResponse`]
//!
//! The token itself travels in the session cookie, never in a body.

use serde::{Deserialize, Serialize};

/// Signup request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Generic success message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Standard error body, mirrored by `AppError`'s response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
