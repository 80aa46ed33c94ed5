//! Staff management endpoints. The whole group is admin-gated in the
//! router.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::{User, UserRole};
use persistence::entities::UserWithStatsRow;
use persistence::repositories::UserRepository;
use shared::password::hash_password;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;

/// A staff account with activity stats, for the admin list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithStats {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub messages_sent: i64,
}

impl From<UserWithStatsRow> for UserWithStats {
    fn from(row: UserWithStatsRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            role: row.role.parse().unwrap_or(UserRole::Staff),
            is_active: row.is_active,
            created_at: row.created_at,
            last_login_at: row.last_login_at,
            messages_sent: row.messages_sent,
        }
    }
}

/// Staff create request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: UserRole,
}

/// Staff partial update. A new password is re-hashed before storage.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithStats>>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let users = repo.list_with_stats().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    payload.validate()?;

    let password_hash =
        hash_password(&payload.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    let repo = UserRepository::new(state.pool.clone());

    // Unique email violations surface as 23505 and map to 409.
    let user = repo
        .create(
            &payload.email,
            &payload.name,
            &password_hash,
            payload.role.as_str(),
        )
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict("Email is already in use".into()),
            other => other,
        })?;

    tracing::info!(user_id = %user.id, "Staff account created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());

    let user = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}

/// PATCH /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    payload.validate()?;

    let password_hash = match &payload.password {
        Some(password) => {
            Some(hash_password(password).map_err(|e| ApiError::Internal(e.to_string()))?)
        }
        None => None,
    };

    let repo = UserRepository::new(state.pool.clone());

    let user = repo
        .update(
            id,
            payload.email.as_deref(),
            payload.name.as_deref(),
            password_hash.as_deref(),
            payload.role.map(|r| r.as_str()),
            payload.is_active,
        )
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict("Email is already in use".into()),
            other => other,
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}

/// DELETE /api/users/:id
///
/// Deactivates the account. Deactivating yourself is rejected so the last
/// admin cannot lock everyone out mid-session.
pub async fn deactivate_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if session.user_id == id {
        return Err(ApiError::validation("Cannot deactivate your own account"));
    }

    let repo = UserRepository::new(state.pool.clone());

    if repo.deactivate(id).await? == 0 {
        return Err(ApiError::NotFound("User not found".into()));
    }

    tracing::info!(user_id = %id, "Staff account deactivated");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateUserRequest {
        CreateUserRequest {
            email: "staff@example.com".to_string(),
            name: "Staff Member".to_string(),
            password: "long-enough-pw".to_string(),
            role: UserRole::Staff,
        }
    }

    #[test]
    fn test_create_request_accepts_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_short_password() {
        let mut req = valid_request();
        req.password = "short".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_bad_email() {
        let mut req = valid_request();
        req.email = "nope".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_role_deserializes() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"email":"a@b.com","name":"A","password":"long-enough-pw","role":"ADMIN"}"#,
        )
        .unwrap();
        assert_eq!(req.role, UserRole::Admin);
    }

    #[test]
    fn test_update_request_empty_is_valid() {
        assert!(UpdateUserRequest::default().validate().is_ok());
    }

    #[test]
    fn test_stats_row_conversion() {
        let row = UserWithStatsRow {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            name: "A".to_string(),
            password_hash: "$argon2id$x".to_string(),
            role: "ADMIN".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
            messages_sent: 7,
        };
        let view: UserWithStats = row.into();
        assert_eq!(view.role, UserRole::Admin);
        assert_eq!(view.messages_sent, 7);

        // The hash must not leak through serialization.
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
