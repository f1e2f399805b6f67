//! # Application Configuration
//!
//! Configuration is loaded from environment variables once at startup,
//! validated, and then carried as an immutable value in application state.
//! Nothing on the request path reads the environment.
//!
//! Keeping the token TTL in one place matters: the token codec and the
//! session cookie must agree on it, or tokens either outlive their cookie
//! or the cookie outlives the token. Both sides read
//! [`Config::token_ttl_days`].

use lib_utils::envs::{get_env, get_env_parse};

/// Token validity period used when the environment does not override it.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 15;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for token signing and verification.
    ///
    /// **Must be at least 32 characters long.** Startup fails without it.
    pub jwt_secret: String,

    /// Identity token validity period in days.
    ///
    /// Shared by token issuance and the session cookie `Max-Age`.
    pub token_ttl_days: i64,

    /// Deployment mode (`development` or `production`).
    ///
    /// Only affects the `Secure` attribute of the session cookie.
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            get_env("DATABASE_URL").unwrap_or_else(|_| "sqlite:data/chirp.db".to_string());

        let jwt_secret = get_env("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set in environment".to_string())?;

        let token_ttl_days = match get_env_parse::<i64>("TOKEN_TTL_DAYS") {
            Ok(days) => days,
            Err(lib_utils::envs::Error::MissingEnv(_)) => DEFAULT_TOKEN_TTL_DAYS,
            Err(e) => return Err(format!("TOKEN_TTL_DAYS must be a valid number: {e}")),
        };

        let environment =
            get_env("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl_days,
            environment,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.token_ttl_days < 1 || self.token_ttl_days > 30 {
            return Err("TOKEN_TTL_DAYS must be between 1 and 30".to_string());
        }

        Ok(())
    }

    /// Whether the session cookie should carry the `Secure` attribute.
    pub fn is_production(&self) -> bool {
        self.environment != "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(secret: &str, ttl: i64) -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: secret.to_string(),
            token_ttl_days: ttl,
            environment: "development".to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let config = config_with("too-short", DEFAULT_TOKEN_TTL_DAYS);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ttl_bounds() {
        let secret = "test-secret-key-must-be-at-least-32-chars-long!";
        assert!(config_with(secret, 15).validate().is_ok());
        assert!(config_with(secret, 0).validate().is_err());
        assert!(config_with(secret, 31).validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut config = config_with("test-secret-key-must-be-at-least-32-chars-long!", 15);
        assert!(!config.is_production());
        config.environment = "production".to_string();
        assert!(config.is_production());
    }
}
