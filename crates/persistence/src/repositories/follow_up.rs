//! Follow-up repository: cadence transitions over the follow_ups and
//! customers tables.
//!
//! Every transition that touches both tables runs inside one transaction,
//! with a status guard on the follow-up row and a row lock on the customer.
//! Two concurrent completions of the same follow-up cannot both pass the
//! `status = 'PENDING'` guard, and the `UNIQUE (customer_id, stage)`
//! constraint backstops duplicate scheduling.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::ReviewPlatform;
use domain::services::cadence::{self, CadenceStep};

use crate::entities::{CustomerEntity, FollowUpEntity};
use crate::metrics::QueryTimer;

/// Result of a `complete` transition.
#[derive(Debug)]
pub enum CompletionOutcome {
    /// No follow-up with that id.
    NotFound,
    /// The follow-up was already completed or skipped; nothing changed.
    AlreadyClosed,
    /// The follow-up completed. `next` is the newly scheduled stage, or
    /// `None` when the cadence is exhausted.
    Advanced {
        customer: CustomerEntity,
        completed: FollowUpEntity,
        next: Option<FollowUpEntity>,
    },
}

/// Result of a `skip` transition.
#[derive(Debug)]
pub enum SkipOutcome {
    NotFound,
    AlreadyClosed,
    Skipped(FollowUpEntity),
}

/// Result of a `mark_reviewed` transition.
#[derive(Debug)]
pub enum ReviewOutcome {
    NotFound,
    Marked {
        customer: CustomerEntity,
        /// Number of pending follow-ups closed by the review.
        closed_follow_ups: u64,
    },
}

/// Repository for follow-up cadence operations.
#[derive(Clone)]
pub struct FollowUpRepository {
    pool: PgPool,
}

impl FollowUpRepository {
    /// Creates a new FollowUpRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a follow-up by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FollowUpEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_follow_up_by_id");
        let result = sqlx::query_as::<_, FollowUpEntity>(
            r#"
            SELECT * FROM follow_ups WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All follow-ups for a customer, in stage order.
    pub async fn list_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<FollowUpEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_follow_ups_by_customer");
        let result = sqlx::query_as::<_, FollowUpEntity>(
            r#"
            SELECT * FROM follow_ups
            WHERE customer_id = $1
            ORDER BY stage ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Completes a pending follow-up and advances the cadence.
    ///
    /// Marks the row COMPLETED, then schedules the successor stage (due
    /// +6 days for stage 2, +14 days for stage 3) or, after the final
    /// stage, clamps the customer at stage 3 and clears the next due
    /// date. Completing a non-pending follow-up changes nothing and
    /// reports `AlreadyClosed`.
    pub async fn complete(
        &self,
        follow_up_id: Uuid,
        feedback: Option<&str>,
    ) -> Result<CompletionOutcome, sqlx::Error> {
        let timer = QueryTimer::new("complete_follow_up");
        let mut tx = self.pool.begin().await?;

        let completed = sqlx::query_as::<_, FollowUpEntity>(
            r#"
            UPDATE follow_ups
            SET status = 'COMPLETED',
                completed_at = NOW(),
                feedback = COALESCE($2, feedback),
                updated_at = NOW()
            WHERE id = $1 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(follow_up_id)
        .bind(feedback)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(completed) = completed else {
            // Distinguish a missing row from a double completion.
            let existing: Option<(String,)> =
                sqlx::query_as("SELECT status FROM follow_ups WHERE id = $1")
                    .bind(follow_up_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;
            timer.record();
            return Ok(match existing {
                None => CompletionOutcome::NotFound,
                Some(_) => CompletionOutcome::AlreadyClosed,
            });
        };

        // Lock the customer row for the stage update.
        let customer = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT * FROM customers WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(completed.customer_id)
        .fetch_one(&mut *tx)
        .await?;

        let completed_at = completed.completed_at.unwrap_or_else(Utc::now);

        let (customer, next) = match cadence::advance(completed.stage, completed_at) {
            CadenceStep::Schedule { stage, due_date } => {
                let next = sqlx::query_as::<_, FollowUpEntity>(
                    r#"
                    INSERT INTO follow_ups (customer_id, stage, status, due_date)
                    VALUES ($1, $2, 'PENDING', $3)
                    RETURNING *
                    "#,
                )
                .bind(customer.id)
                .bind(stage)
                .bind(due_date)
                .fetch_one(&mut *tx)
                .await?;

                let customer = sqlx::query_as::<_, CustomerEntity>(
                    r#"
                    UPDATE customers
                    SET follow_up_stage = $2,
                        next_follow_up_date = $3,
                        updated_at = NOW()
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(customer.id)
                .bind(stage)
                .bind(due_date)
                .fetch_one(&mut *tx)
                .await?;

                (customer, Some(next))
            }
            CadenceStep::Exhausted => {
                let customer = sqlx::query_as::<_, CustomerEntity>(
                    r#"
                    UPDATE customers
                    SET follow_up_stage = $2,
                        next_follow_up_date = NULL,
                        updated_at = NOW()
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(customer.id)
                .bind(cadence::FINAL_STAGE)
                .fetch_one(&mut *tx)
                .await?;

                (customer, None)
            }
        };

        tx.commit().await?;
        timer.record();

        Ok(CompletionOutcome::Advanced {
            customer,
            completed,
            next,
        })
    }

    /// Skips a pending follow-up.
    ///
    /// The row is closed with the given feedback (default "Skipped") but
    /// the customer's stage does not advance and no successor is
    /// scheduled.
    pub async fn skip(
        &self,
        follow_up_id: Uuid,
        feedback: Option<&str>,
    ) -> Result<SkipOutcome, sqlx::Error> {
        let timer = QueryTimer::new("skip_follow_up");

        let skipped = sqlx::query_as::<_, FollowUpEntity>(
            r#"
            UPDATE follow_ups
            SET status = 'SKIPPED',
                completed_at = NOW(),
                feedback = COALESCE($2, 'Skipped'),
                updated_at = NOW()
            WHERE id = $1 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(follow_up_id)
        .bind(feedback)
        .fetch_optional(&self.pool)
        .await?;

        let outcome = match skipped {
            Some(entity) => SkipOutcome::Skipped(entity),
            None => {
                let existing: Option<(String,)> =
                    sqlx::query_as("SELECT status FROM follow_ups WHERE id = $1")
                        .bind(follow_up_id)
                        .fetch_optional(&self.pool)
                        .await?;
                match existing {
                    None => SkipOutcome::NotFound,
                    Some(_) => SkipOutcome::AlreadyClosed,
                }
            }
        };
        timer.record();
        Ok(outcome)
    }

    /// Records that the customer left a review.
    ///
    /// Sets the terminal review state, clears the next due date, and
    /// closes every pending follow-up with the review feedback marker.
    /// Valid from any stage, including the exhausted state.
    pub async fn mark_reviewed(
        &self,
        customer_id: Uuid,
        platform: ReviewPlatform,
    ) -> Result<ReviewOutcome, sqlx::Error> {
        let timer = QueryTimer::new("mark_customer_reviewed");
        let mut tx = self.pool.begin().await?;

        let customer = sqlx::query_as::<_, CustomerEntity>(
            r#"
            UPDATE customers
            SET review_status = 'LEFT_REVIEW',
                review_platform = $2,
                next_follow_up_date = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(platform.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(customer) = customer else {
            tx.rollback().await?;
            timer.record();
            return Ok(ReviewOutcome::NotFound);
        };

        let closed = sqlx::query(
            r#"
            UPDATE follow_ups
            SET status = 'COMPLETED',
                completed_at = NOW(),
                feedback = 'Customer left review',
                updated_at = NOW()
            WHERE customer_id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(customer_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();

        Ok(ReviewOutcome::Marked {
            customer,
            closed_follow_ups: closed.rows_affected(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_variants_are_debuggable() {
        // Database behavior is covered by the cadence unit tests plus the
        // SQL guards; here we only pin the outcome API surface.
        let outcome = CompletionOutcome::NotFound;
        assert!(format!("{:?}", outcome).contains("NotFound"));

        let outcome = SkipOutcome::AlreadyClosed;
        assert!(format!("{:?}", outcome).contains("AlreadyClosed"));
    }
}
