//! # Web Library
//!
//! HTTP handlers, authentication middleware, session cookie handling, and
//! server bootstrap.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod session;

pub use server::{start_server, AppState, ServerConfig};
