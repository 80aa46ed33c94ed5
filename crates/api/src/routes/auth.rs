//! Authentication endpoints: login and current principal.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain::models::User;
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;
use crate::services::auth::{AuthError, AuthService};

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response: bearer token plus the authenticated profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.validate()?;

    let service = AuthService::new(state.pool.clone(), state.session_keys.clone());

    let result = service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials | AuthError::UserDisabled => {
                ApiError::Unauthorized("Invalid email or password".into())
            }
            other => ApiError::Internal(other.to_string()),
        })?;

    Ok(Json(LoginResponse {
        token: result.token,
        expires_in: result.expires_in,
        user: result.user,
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<User>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());

    let entity = repo
        .find_by_id(session.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| ApiError::Unauthorized("Account no longer active".into()))?;

    Ok(Json(entity.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validates_email() {
        let req = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_request_requires_password() {
        let req = LoginRequest {
            email: "staff@example.com".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_request_accepts_valid() {
        let req = LoginRequest {
            email: "staff@example.com".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_request_deserializes_camel_case() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"pw"}"#).unwrap();
        assert_eq!(req.email, "a@b.com");
    }
}
