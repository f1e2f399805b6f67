//! # Authentication Library
//!
//! Password hashing and signed identity token management.
//!
//! Both modules are pure: no I/O happens here beyond the signing and
//! verification computation itself. The signing secret and token TTL are
//! passed in by the caller, which keeps this crate free of configuration
//! lookups.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password};
pub use token::{issue_token, verify_token, Claims};
