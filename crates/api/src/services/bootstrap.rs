//! Startup seeding.
//!
//! After migrations: create the first admin account from configuration if
//! no active admin exists, and seed the default cadence templates into an
//! empty templates table. Idempotent across restarts.

use sqlx::PgPool;
use tracing::{info, warn};

use persistence::repositories::{TemplateRepository, UserRepository};
use shared::password::{hash_password, PasswordError};

use crate::config::BootstrapConfig;

/// Default templates seeded on first boot, one per cadence stage.
const DEFAULT_TEMPLATES: [(&str, &str); 3] = [
    (
        "First follow-up",
        "Hi {{firstName}}! Thanks for choosing {{company}} for your {{product}}. \
         How is everything working out? We'd love to hear from you!",
    ),
    (
        "Second follow-up",
        "Hi {{firstName}}, just checking in on your {{product}}. If you're happy \
         with it, a quick review would mean a lot to us at {{company}}!",
    ),
    (
        "Final follow-up",
        "Hi {{firstName}}, one last note from {{company}}. If you have a minute, \
         we'd really appreciate a review of your {{product}}. Thank you!",
    ),
];

/// Error types for startup seeding.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Run startup seeding. Called after migrations.
pub async fn run(pool: &PgPool, config: &BootstrapConfig) -> Result<(), BootstrapError> {
    seed_admin(pool, config).await?;
    seed_templates(pool).await
}

async fn seed_admin(pool: &PgPool, config: &BootstrapConfig) -> Result<(), BootstrapError> {
    if config.admin_email.is_empty() {
        return Ok(());
    }

    if config.admin_password.is_empty() {
        warn!("RL__BOOTSTRAP__ADMIN_EMAIL is set but RL__BOOTSTRAP__ADMIN_PASSWORD is empty - skipping admin bootstrap");
        return Ok(());
    }

    let users = UserRepository::new(pool.clone());

    if users.any_admin_exists().await? {
        return Ok(());
    }

    let password_hash = hash_password(&config.admin_password)?;
    let admin = users
        .create(
            &config.admin_email,
            &config.admin_name,
            &password_hash,
            "ADMIN",
        )
        .await?;

    info!(
        email = %config.admin_email,
        user_id = %admin.id,
        "Bootstrap admin user created"
    );

    warn!(
        "SECURITY: Remove RL__BOOTSTRAP__ADMIN_EMAIL and RL__BOOTSTRAP__ADMIN_PASSWORD \
         from configuration after initial setup and rotate the password"
    );

    Ok(())
}

async fn seed_templates(pool: &PgPool) -> Result<(), BootstrapError> {
    let templates = TemplateRepository::new(pool.clone());

    if templates.count().await? > 0 {
        return Ok(());
    }

    for (name, body) in DEFAULT_TEMPLATES {
        templates.create(name, body).await?;
    }

    info!(count = DEFAULT_TEMPLATES.len(), "Seeded default templates");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::template::{render_body, TemplateVars};

    #[test]
    fn test_default_templates_cover_all_stages() {
        assert_eq!(DEFAULT_TEMPLATES.len(), 3);
    }

    #[test]
    fn test_default_templates_render_cleanly() {
        let vars = TemplateVars {
            first_name: "Ada",
            last_name: "Lovelace",
            product: "dishwasher",
            company: "Review Loop Appliances",
        };

        for (name, body) in DEFAULT_TEMPLATES {
            let rendered = render_body(body, &vars);
            assert!(!rendered.contains("{{"), "unresolved token in {}", name);
            assert!(rendered.contains("Ada"));
        }
    }
}
