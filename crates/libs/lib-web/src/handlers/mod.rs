//! # HTTP Handlers
//!
//! Request handlers, grouped by resource. Authentication endpoints live in
//! [`auth`]; everything else expects an [`AuthUser`] to have been attached
//! by the auth middleware.
//!
//! [`AuthUser`]: crate::middleware::AuthUser

pub mod auth;
pub mod notifications;
pub mod posts;
pub mod users;
