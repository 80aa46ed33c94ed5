//! Template repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TemplateEntity;
use crate::metrics::QueryTimer;

/// Repository for message template operations.
#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    /// Creates a new TemplateRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new template (active by default).
    pub async fn create(&self, name: &str, body: &str) -> Result<TemplateEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_template");
        let result = sqlx::query_as::<_, TemplateEntity>(
            r#"
            INSERT INTO templates (name, body, is_active)
            VALUES ($1, $2, TRUE)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(body)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find template by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_template_by_id");
        let result = sqlx::query_as::<_, TemplateEntity>(
            r#"
            SELECT * FROM templates WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All templates, newest first.
    pub async fn list(&self) -> Result<Vec<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_templates");
        let result = sqlx::query_as::<_, TemplateEntity>(
            r#"
            SELECT * FROM templates ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Number of templates, used by startup seeding.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_templates");
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM templates")
            .fetch_one(&self.pool)
            .await?;
        timer.record();
        Ok(count.0)
    }

    /// Update a template (partial update).
    /// Only provided fields are updated; None values are preserved.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        body: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<TemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_template");
        let result = sqlx::query_as::<_, TemplateEntity>(
            r#"
            UPDATE templates SET
                name = COALESCE($2, name),
                body = COALESCE($3, body),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(body)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a template.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_template");
        let result = sqlx::query(
            r#"
            DELETE FROM templates WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_repository_creation() {
        // CRUD queries are exercised against a real database in
        // deployment; rendering logic is covered in the domain crate.
    }
}
