//! Message entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Message, MessageDirection};

/// Database row mapping for the messages table.
#[derive(Debug, Clone, FromRow)]
pub struct MessageEntity {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub body: String,
    pub direction: String,
    pub provider_sid: Option<String>,
    pub sent_by: Option<Uuid>,
    pub sent_at: DateTime<Utc>,
}

impl From<MessageEntity> for Message {
    fn from(entity: MessageEntity) -> Self {
        Self {
            id: entity.id,
            customer_id: entity.customer_id,
            body: entity.body,
            direction: entity
                .direction
                .parse()
                .unwrap_or(MessageDirection::Outbound), // Default fallback
            provider_sid: entity.provider_sid,
            sent_by: entity.sent_by,
            sent_at: entity.sent_at,
        }
    }
}

/// Message row joined with the sending staff member's name, for customer
/// conversation views.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithSenderRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub body: String,
    pub direction: String,
    pub provider_sid: Option<String>,
    pub sent_by: Option<Uuid>,
    pub sent_at: DateTime<Utc>,
    pub sender_name: Option<String>,
}

/// Message row joined with customer identity, for the global inbox.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithCustomerRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub body: String,
    pub direction: String,
    pub sent_at: DateTime<Utc>,
    pub sender_name: Option<String>,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_parses_direction() {
        let entity = MessageEntity {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            body: "Thanks!".to_string(),
            direction: "INBOUND".to_string(),
            provider_sid: Some("SM123".to_string()),
            sent_by: None,
            sent_at: Utc::now(),
        };

        let message: Message = entity.into();
        assert_eq!(message.direction, MessageDirection::Inbound);
        assert_eq!(message.provider_sid.as_deref(), Some("SM123"));
    }
}
