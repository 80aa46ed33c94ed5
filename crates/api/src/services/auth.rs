//! Authentication service: credential verification and session issuing.

use sqlx::PgPool;
use thiserror::Error;

use domain::models::User;
use persistence::repositories::UserRepository;
use shared::password::{verify_password, PasswordError};
use shared::session::{SessionError, SessionKeys};

/// Errors that can occur during login.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User is disabled")]
    UserDisabled,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
    pub expires_in: i64,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    keys: SessionKeys,
}

impl AuthService {
    /// Creates a new AuthService over the given pool and session keys.
    pub fn new(pool: PgPool, keys: SessionKeys) -> Self {
        Self {
            users: UserRepository::new(pool),
            keys,
        }
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown email and wrong password both map to `InvalidCredentials`
    /// so login failures do not reveal which accounts exist. A successful
    /// login stamps `last_login_at`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let entity = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &entity.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if !entity.is_active {
            return Err(AuthError::UserDisabled);
        }

        self.users.touch_last_login(entity.id).await?;

        let user: User = entity.into();
        let token = self.keys.issue(user.id, user.role.as_str())?;

        tracing::info!(user_id = %user.id, "Staff login");

        Ok(LoginResult {
            user,
            token,
            expires_in: self.keys.expiry_secs(),
        })
    }
}
