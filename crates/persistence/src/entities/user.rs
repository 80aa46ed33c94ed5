//! Staff user entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{User, UserRole};

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            password_hash: entity.password_hash,
            role: entity.role.parse().unwrap_or(UserRole::Staff), // Default fallback
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            last_login_at: entity.last_login_at,
        }
    }
}

/// User row with message activity, for the admin user list.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithStatsRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub messages_sent: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_parses_role() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            password_hash: "$argon2id$x".to_string(),
            role: "ADMIN".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        };

        let user: User = entity.into();
        assert_eq!(user.role, UserRole::Admin);
        assert!(user.is_active);
    }

    #[test]
    fn test_conversion_unknown_role_falls_back_to_staff() {
        let entity = UserEntity {
            id: Uuid::new_v4(),
            email: "x@example.com".to_string(),
            name: "X".to_string(),
            password_hash: "h".to_string(),
            role: "SUPERUSER".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        };

        let user: User = entity.into();
        assert_eq!(user.role, UserRole::Staff);
    }
}
