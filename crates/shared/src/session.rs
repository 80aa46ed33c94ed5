//! Session token issuing and verification.
//!
//! Staff sessions are stateless bearer tokens (HS256 JWTs). Each request
//! validates the token and reconstructs the principal; there is no global
//! session store.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for session token operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to issue session token: {0}")]
    Issue(String),

    #[error("Invalid or expired session token")]
    Invalid,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID (subject).
    pub sub: Uuid,
    /// Staff role at issue time ("ADMIN" or "STAFF").
    pub role: String,
    /// Token ID, unique per login.
    pub jti: String,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

/// Keys and policy for issuing/verifying session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_secs: i64,
    leeway_secs: u64,
}

impl SessionKeys {
    /// Builds session keys from a shared secret.
    pub fn new(secret: &str, expiry_secs: i64, leeway_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
            leeway_secs,
        }
    }

    /// Issues a session token for the given user and role.
    pub fn issue(&self, user_id: Uuid, role: &str) -> Result<String, SessionError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id,
            role: role.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + self.expiry_secs,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| SessionError::Issue(e.to_string()))
    }

    /// Verifies a session token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let mut validation = Validation::default();
        validation.leeway = self.leeway_secs;

        decode::<SessionClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| SessionError::Invalid)
    }

    /// Expiry policy in seconds, exposed for login responses.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> SessionKeys {
        SessionKeys::new("test-secret-at-least-32-bytes-long!!", 3600, 30)
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let keys = test_keys();
        let user_id = Uuid::new_v4();

        let token = keys.issue(user_id, "ADMIN").unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "ADMIN");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let keys = test_keys();
        assert!(matches!(
            keys.verify("not.a.token"),
            Err(SessionError::Invalid)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let keys = test_keys();
        let other = SessionKeys::new("a-completely-different-secret-value!", 3600, 30);

        let token = keys.issue(Uuid::new_v4(), "STAFF").unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Negative expiry backdates the token past the leeway window.
        let keys = SessionKeys::new("test-secret-at-least-32-bytes-long!!", -120, 0);
        let token = keys.issue(Uuid::new_v4(), "STAFF").unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_tokens_have_unique_jti() {
        let keys = test_keys();
        let user_id = Uuid::new_v4();

        let a = keys.verify(&keys.issue(user_id, "STAFF").unwrap()).unwrap();
        let b = keys.verify(&keys.issue(user_id, "STAFF").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }
}
