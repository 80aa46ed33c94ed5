//! Follow-up entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{FollowUp, FollowUpStatus};

/// Database row mapping for the follow_ups table.
#[derive(Debug, Clone, FromRow)]
pub struct FollowUpEntity {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub stage: i32,
    pub status: String,
    pub due_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FollowUpEntity> for FollowUp {
    fn from(entity: FollowUpEntity) -> Self {
        Self {
            id: entity.id,
            customer_id: entity.customer_id,
            stage: entity.stage,
            status: entity.status.parse().unwrap_or(FollowUpStatus::Pending), // Default fallback
            due_date: entity.due_date,
            completed_at: entity.completed_at,
            feedback: entity.feedback,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_parses_status() {
        let entity = FollowUpEntity {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            stage: 2,
            status: "SKIPPED".to_string(),
            due_date: Utc::now(),
            completed_at: Some(Utc::now()),
            feedback: Some("No answer".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let follow_up: FollowUp = entity.into();
        assert_eq!(follow_up.status, FollowUpStatus::Skipped);
        assert_eq!(follow_up.stage, 2);
        assert_eq!(follow_up.feedback.as_deref(), Some("No answer"));
    }
}
