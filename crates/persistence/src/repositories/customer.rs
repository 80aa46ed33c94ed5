//! Customer repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::CustomerFilter;
use domain::services::cadence;

use crate::entities::{CustomerEntity, FollowUpEntity};
use crate::metrics::QueryTimer;

/// Fields required to create a customer at intake.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub product: String,
    pub purchase_date: chrono::DateTime<chrono::Utc>,
    pub delivery_date: chrono::DateTime<chrono::Utc>,
    pub special_note: Option<String>,
    pub created_by: Option<Uuid>,
}

/// Repository for customer-related database operations.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a customer and the stage-1 follow-up in one transaction.
    ///
    /// The customer starts at stage 0 with a PENDING stage-1 follow-up
    /// due one day after delivery.
    pub async fn create(
        &self,
        new: &NewCustomer,
    ) -> Result<(CustomerEntity, FollowUpEntity), sqlx::Error> {
        let timer = QueryTimer::new("create_customer");
        let first_due = cadence::first_due_date(new.delivery_date);

        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, CustomerEntity>(
            r#"
            INSERT INTO customers (
                first_name, last_name, phone, email, address, city, product,
                purchase_date, delivery_date, special_note,
                follow_up_stage, next_follow_up_date, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.address)
        .bind(&new.city)
        .bind(&new.product)
        .bind(new.purchase_date)
        .bind(new.delivery_date)
        .bind(&new.special_note)
        .bind(first_due)
        .bind(new.created_by)
        .fetch_one(&mut *tx)
        .await?;

        let follow_up = sqlx::query_as::<_, FollowUpEntity>(
            r#"
            INSERT INTO follow_ups (customer_id, stage, status, due_date)
            VALUES ($1, 1, 'PENDING', $2)
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(first_due)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok((customer, follow_up))
    }

    /// Find customer by id (including archived).
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CustomerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_customer_by_id");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT * FROM customers WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List non-archived customers with search, filter, and pagination.
    ///
    /// The search term matches case-insensitively against name, phone,
    /// email, product, and city.
    pub async fn list(
        &self,
        search: &str,
        filter: CustomerFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CustomerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_customers");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT * FROM customers
            WHERE is_archived = FALSE
              AND ($1 = ''
                   OR first_name ILIKE '%' || $1 || '%'
                   OR last_name ILIKE '%' || $1 || '%'
                   OR phone ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%'
                   OR product ILIKE '%' || $1 || '%'
                   OR city ILIKE '%' || $1 || '%')
              AND CASE $2
                    WHEN 'reviewed' THEN review_status = 'LEFT_REVIEW'
                    WHEN 'pending' THEN review_status = 'NONE' AND follow_up_stage < 3
                    WHEN 'no-review' THEN review_status = 'NONE' AND follow_up_stage >= 3
                    ELSE TRUE
                  END
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(search)
        .bind(filter.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count customers matching the same search and filter as `list`.
    pub async fn count(
        &self,
        search: &str,
        filter: CustomerFilter,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_customers");
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM customers
            WHERE is_archived = FALSE
              AND ($1 = ''
                   OR first_name ILIKE '%' || $1 || '%'
                   OR last_name ILIKE '%' || $1 || '%'
                   OR phone ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%'
                   OR product ILIKE '%' || $1 || '%'
                   OR city ILIKE '%' || $1 || '%')
              AND CASE $2
                    WHEN 'reviewed' THEN review_status = 'LEFT_REVIEW'
                    WHEN 'pending' THEN review_status = 'NONE' AND follow_up_stage < 3
                    WHEN 'no-review' THEN review_status = 'NONE' AND follow_up_stage >= 3
                    ELSE TRUE
                  END
            "#,
        )
        .bind(search)
        .bind(filter.as_str())
        .fetch_one(&self.pool)
        .await?;
        timer.record();
        Ok(count.0)
    }

    /// Update contact and product fields (partial update).
    /// Only provided fields are updated; None values are preserved.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
        city: Option<&str>,
        product: Option<&str>,
        special_note: Option<&str>,
    ) -> Result<Option<CustomerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_customer");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            UPDATE customers SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                phone = COALESCE($4, phone),
                email = COALESCE($5, email),
                address = COALESCE($6, address),
                city = COALESCE($7, city),
                product = COALESCE($8, product),
                special_note = COALESCE($9, special_note),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(email)
        .bind(address)
        .bind(city)
        .bind(product)
        .bind(special_note)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Archive a customer (soft delete).
    /// Returns the number of rows updated (0 or 1).
    pub async fn archive(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("archive_customer");
        let result = sqlx::query(
            r#"
            UPDATE customers SET is_archived = TRUE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Best-effort phone match for inbound SMS.
    ///
    /// Matches the exact stored string or the last ten digits of the
    /// stored number. Archived customers never match.
    pub async fn find_by_phone(
        &self,
        match_key: &str,
        raw: &str,
    ) -> Result<Option<CustomerEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_customer_by_phone");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT * FROM customers
            WHERE is_archived = FALSE
              AND (phone = $2
                   OR regexp_replace(phone, '[^0-9]', '', 'g') LIKE '%' || $1)
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(match_key)
        .bind(raw)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_new_customer_is_constructible() {
        let new = NewCustomer {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "5551234567".to_string(),
            email: None,
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            product: "Range".to_string(),
            purchase_date: Utc::now(),
            delivery_date: Utc::now(),
            special_note: None,
            created_by: None,
        };
        assert_eq!(new.first_name, "Ada");
    }
}
