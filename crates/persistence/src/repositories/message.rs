//! Message repository for the append-only SMS log.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{MessageEntity, MessageWithCustomerRow, MessageWithSenderRow};
use crate::metrics::QueryTimer;

/// Repository for message-related database operations. Messages are only
/// ever inserted and read.
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Creates a new MessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an outbound message attributed to a staff user.
    pub async fn record_outbound(
        &self,
        customer_id: Uuid,
        body: &str,
        sent_by: Uuid,
    ) -> Result<MessageEntity, sqlx::Error> {
        let timer = QueryTimer::new("record_outbound_message");
        let result = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO messages (customer_id, body, direction, sent_by)
            VALUES ($1, $2, 'OUTBOUND', $3)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(body)
        .bind(sent_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record an inbound message with the gateway's message id.
    pub async fn record_inbound(
        &self,
        customer_id: Uuid,
        body: &str,
        provider_sid: Option<&str>,
    ) -> Result<MessageEntity, sqlx::Error> {
        let timer = QueryTimer::new("record_inbound_message");
        let result = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO messages (customer_id, body, direction, provider_sid)
            VALUES ($1, $2, 'INBOUND', $3)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(body)
        .bind(provider_sid)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Conversation for one customer, oldest first, with sender names.
    pub async fn list_for_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<MessageWithSenderRow>, sqlx::Error> {
        let timer = QueryTimer::new("list_messages_for_customer");
        let result = sqlx::query_as::<_, MessageWithSenderRow>(
            r#"
            SELECT m.id, m.customer_id, m.body, m.direction, m.provider_sid,
                   m.sent_by, m.sent_at, u.name AS sender_name
            FROM messages m
            LEFT JOIN users u ON u.id = m.sent_by
            WHERE m.customer_id = $1
            ORDER BY m.sent_at ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Global inbox: most recent messages across all non-archived
    /// customers, newest first.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<MessageWithCustomerRow>, sqlx::Error> {
        let timer = QueryTimer::new("list_recent_messages");
        let result = sqlx::query_as::<_, MessageWithCustomerRow>(
            r#"
            SELECT m.id, m.customer_id, m.body, m.direction, m.sent_at,
                   u.name AS sender_name,
                   c.first_name AS customer_first_name,
                   c.last_name AS customer_last_name,
                   c.phone AS customer_phone
            FROM messages m
            JOIN customers c ON c.id = m.customer_id
            LEFT JOIN users u ON u.id = m.sent_by
            WHERE c.is_archived = FALSE
            ORDER BY m.sent_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_repository_creation() {
        // Repository behavior is exercised against a real database in
        // deployment; unit coverage lives in the entity conversions.
    }
}
