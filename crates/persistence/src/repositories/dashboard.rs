//! Dashboard repository: aggregate counts and worklists.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::{
    DashboardOverview, DashboardStats, DueFollowUp, FollowUpStatus, RecentCustomer, ReviewStatus,
};
use domain::services::cadence;

use crate::metrics::QueryTimer;

#[derive(Debug, sqlx::FromRow)]
struct DueFollowUpRow {
    id: Uuid,
    customer_id: Uuid,
    stage: i32,
    status: String,
    due_date: DateTime<Utc>,
    customer_name: String,
    customer_phone: String,
    product: String,
}

impl From<DueFollowUpRow> for DueFollowUp {
    fn from(row: DueFollowUpRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            stage: row.stage,
            status: row.status.parse().unwrap_or(FollowUpStatus::Pending),
            due_date: row.due_date,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            product: row.product,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecentCustomerRow {
    id: Uuid,
    name: String,
    product: String,
    city: String,
    review_status: String,
    created_at: DateTime<Utc>,
}

impl From<RecentCustomerRow> for RecentCustomer {
    fn from(row: RecentCustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            product: row.product,
            city: row.city,
            review_status: row.review_status.parse().unwrap_or(ReviewStatus::None),
            created_at: row.created_at,
        }
    }
}

/// Repository for dashboard aggregates. Archived customers are excluded
/// from every count and list.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    /// Creates a new DashboardRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Headline stats, the ten most overdue pending follow-ups, and the
    /// five most recent customers.
    pub async fn get_overview(&self) -> Result<DashboardOverview, sqlx::Error> {
        let timer = QueryTimer::new("dashboard_overview");

        let counts: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM customers WHERE is_archived = FALSE),
                (SELECT COUNT(*) FROM customers
                 WHERE is_archived = FALSE AND review_status = 'LEFT_REVIEW'),
                (SELECT COUNT(*) FROM follow_ups f
                 JOIN customers c ON c.id = f.customer_id
                 WHERE c.is_archived = FALSE
                   AND f.status = 'PENDING'
                   AND f.due_date <= NOW()),
                (SELECT COUNT(*) FROM customers
                 WHERE is_archived = FALSE
                   AND review_status = 'NONE'
                   AND follow_up_stage >= $1)
            "#,
        )
        .bind(cadence::FINAL_STAGE)
        .fetch_one(&self.pool)
        .await?;

        let (total, reviewed, due, never_reviewed) = counts;

        let pending_rows = sqlx::query_as::<_, DueFollowUpRow>(
            r#"
            SELECT f.id, f.customer_id, f.stage, f.status, f.due_date,
                   c.first_name || ' ' || c.last_name AS customer_name,
                   c.phone AS customer_phone,
                   c.product
            FROM follow_ups f
            JOIN customers c ON c.id = f.customer_id
            WHERE c.is_archived = FALSE
              AND f.status = 'PENDING'
              AND f.due_date <= NOW()
            ORDER BY f.due_date ASC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let recent_rows = sqlx::query_as::<_, RecentCustomerRow>(
            r#"
            SELECT id, first_name || ' ' || last_name AS name,
                   product, city, review_status, created_at
            FROM customers
            WHERE is_archived = FALSE
            ORDER BY created_at DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        timer.record();

        Ok(DashboardOverview {
            stats: DashboardStats {
                total_customers: total,
                reviewed_customers: reviewed,
                pending_follow_ups: due,
                never_reviewed,
                review_rate: DashboardStats::review_rate(reviewed, total),
            },
            pending_follow_ups: pending_rows.into_iter().map(Into::into).collect(),
            recent_customers: recent_rows.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_row_converts() {
        let row = DueFollowUpRow {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            stage: 2,
            status: "PENDING".to_string(),
            due_date: Utc::now(),
            customer_name: "Ada Lovelace".to_string(),
            customer_phone: "5551234567".to_string(),
            product: "Range".to_string(),
        };
        let due: DueFollowUp = row.into();
        assert_eq!(due.stage, 2);
        assert_eq!(due.status, FollowUpStatus::Pending);
    }

    #[test]
    fn test_recent_row_falls_back_on_unknown_status() {
        let row = RecentCustomerRow {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_string(),
            product: "Range".to_string(),
            city: "London".to_string(),
            review_status: "BOGUS".to_string(),
            created_at: Utc::now(),
        };
        let recent: RecentCustomer = row.into();
        assert_eq!(recent.review_status, ReviewStatus::None);
    }
}
