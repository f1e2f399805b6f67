//! # Identity Tokens
//!
//! Issues and verifies signed, time-bound identity tokens (JWT, HS256).
//!
//! A token is a self-contained claim `{ sub, iat, exp }` over the subject's
//! user id. Verification needs only the signing secret, so the request path
//! never pays a store round-trip for token checks. Expiry is always
//! enforced: a token past its `exp` is rejected regardless of signature.

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::time::now_utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an identity token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id, decimal string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp), always `iat` + TTL
    pub exp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Signature is valid but the token is past its expiry.
    #[error("token expired")]
    Expired,

    /// Malformed, forged, or otherwise unverifiable token.
    #[error("token invalid")]
    Invalid,

    /// The signing primitive itself failed while issuing.
    #[error("token signing failed")]
    FailToSign,
}

/// Issue a signed token for `subject`, valid for `ttl_days` from now.
pub fn issue_token(subject: &str, secret: &str, ttl_days: i64) -> Result<String, Error> {
    let now = now_utc();
    let exp = now + Duration::days(ttl_days);

    let claims = Claims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| Error::FailToSign)
}

/// Verify a token and return its subject.
///
/// Never panics on attacker-controlled input: every failure from the JWT
/// primitive is converted to a typed error here. `Expired` and `Invalid`
/// stay distinct for callers and logs; client-facing code collapses them.
pub fn verify_token(token: &str, secret: &str) -> Result<String, Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => Error::Expired,
        _ => Error::Invalid,
    })?;

    Ok(token_data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_utils::b64::{b64u_decode_to_string, b64u_encode};

    const SECRET: &str = "test-secret-key-must-be-at-least-32-chars-long!";
    const TTL_DAYS: i64 = 15;

    /// Encode arbitrary claims directly, bypassing `issue_token`.
    fn encode_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("raw encode should succeed")
    }

    #[test]
    fn test_round_trip_returns_subject() {
        let token = issue_token("u1", SECRET, TTL_DAYS).expect("issue should succeed");
        let subject = verify_token(&token, SECRET).expect("verify should succeed");
        assert_eq!(subject, "u1");
    }

    #[test]
    fn test_expiry_matches_ttl() {
        let token = issue_token("42", SECRET, TTL_DAYS).unwrap();
        let payload = token.split('.').nth(1).expect("token should have a payload segment");
        let claims: Claims =
            serde_json::from_str(&b64u_decode_to_string(payload).unwrap()).unwrap();
        assert_eq!(claims.exp - claims.iat, TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = issue_token("u1", SECRET, TTL_DAYS).unwrap();
        let result = verify_token(&token, "another-secret-key-of-sufficient-length!");
        assert_eq!(result, Err(Error::Invalid));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        assert_eq!(verify_token("not-a-token", SECRET), Err(Error::Invalid));
        assert_eq!(verify_token("a.b.c", SECRET), Err(Error::Invalid));
        assert_eq!(verify_token("", SECRET), Err(Error::Invalid));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Issued 16 days ago with a 15 day TTL: cryptographically valid,
        // but past expiry.
        let now = lib_utils::time::now_utc().timestamp();
        let claims = Claims {
            sub: "u1".to_string(),
            iat: now - 16 * 24 * 60 * 60,
            exp: now - 24 * 60 * 60,
        };
        let token = encode_raw(&claims, SECRET);
        assert_eq!(verify_token(&token, SECRET), Err(Error::Expired));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let token = issue_token("u1", SECRET, TTL_DAYS).unwrap();
        let mut segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);

        // Swap the subject inside the payload without re-signing.
        let payload = b64u_decode_to_string(segments[1]).unwrap();
        let forged_payload = payload.replace("\"u1\"", "\"u2\"");
        let forged_segment = b64u_encode(forged_payload);
        segments[1] = &forged_segment;

        let forged = segments.join(".");
        assert_eq!(verify_token(&forged, SECRET), Err(Error::Invalid));
    }
}
