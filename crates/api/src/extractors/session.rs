//! Session principal extractor.
//!
//! The `require_session` middleware validates the bearer token and inserts a
//! `Session` into request extensions; handlers pull it out with this
//! extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use domain::models::UserRole;
use shared::session::SessionClaims;

use crate::error::ApiError;

/// The authenticated staff principal for the current request.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Session {
    /// Builds a session from verified token claims. An unknown role string
    /// rejects the token rather than degrading silently.
    pub fn from_claims(claims: &SessionClaims) -> Result<Self, ApiError> {
        let role = claims
            .role
            .parse()
            .map_err(|_| ApiError::Unauthorized("Invalid session token".into()))?;

        Ok(Self {
            user_id: claims.sub,
            role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(role: &str) -> SessionClaims {
        let now = Utc::now().timestamp();
        SessionClaims {
            sub: Uuid::new_v4(),
            role: role.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + 3600,
        }
    }

    #[test]
    fn test_from_claims_admin() {
        let session = Session::from_claims(&claims("ADMIN")).unwrap();
        assert!(session.is_admin());
    }

    #[test]
    fn test_from_claims_staff() {
        let session = Session::from_claims(&claims("STAFF")).unwrap();
        assert!(!session.is_admin());
    }

    #[test]
    fn test_from_claims_rejects_unknown_role() {
        assert!(Session::from_claims(&claims("ROOT")).is_err());
    }
}
