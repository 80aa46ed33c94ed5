//! Customer entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Customer, ReviewStatus};

/// Database row mapping for the customers table.
///
/// Enum columns are stored as TEXT and parsed into domain enums on
/// conversion.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerEntity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub city: String,
    pub product: String,
    pub purchase_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,
    pub special_note: Option<String>,
    pub follow_up_stage: i32,
    pub review_status: String,
    pub review_platform: Option<String>,
    pub next_follow_up_date: Option<DateTime<Utc>>,
    pub is_archived: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerEntity> for Customer {
    fn from(entity: CustomerEntity) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone: entity.phone,
            email: entity.email,
            address: entity.address,
            city: entity.city,
            product: entity.product,
            purchase_date: entity.purchase_date,
            delivery_date: entity.delivery_date,
            special_note: entity.special_note,
            follow_up_stage: entity.follow_up_stage,
            review_status: entity
                .review_status
                .parse()
                .unwrap_or(ReviewStatus::None), // Default fallback
            review_platform: entity
                .review_platform
                .and_then(|p| p.parse().ok()),
            next_follow_up_date: entity.next_follow_up_date,
            is_archived: entity.is_archived,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::ReviewPlatform;

    fn test_entity() -> CustomerEntity {
        use fake::faker::internet::en::SafeEmail;
        use fake::Fake;

        CustomerEntity {
            id: Uuid::new_v4(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            phone: "(555) 123-4567".to_string(),
            email: Some(SafeEmail().fake()),
            address: "1 Navy Way".to_string(),
            city: "Arlington".to_string(),
            product: "Washer".to_string(),
            purchase_date: Utc::now(),
            delivery_date: Utc::now(),
            special_note: None,
            follow_up_stage: 0,
            review_status: "NONE".to_string(),
            review_platform: None,
            next_follow_up_date: Some(Utc::now()),
            is_archived: false,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_conversion_parses_enums() {
        let mut entity = test_entity();
        entity.review_status = "LEFT_REVIEW".to_string();
        entity.review_platform = Some("YELP".to_string());

        let customer: Customer = entity.into();
        assert_eq!(customer.review_status, ReviewStatus::LeftReview);
        assert_eq!(customer.review_platform, Some(ReviewPlatform::Yelp));
    }

    #[test]
    fn test_conversion_unknown_status_falls_back() {
        let mut entity = test_entity();
        entity.review_status = "???".to_string();

        let customer: Customer = entity.into();
        assert_eq!(customer.review_status, ReviewStatus::None);
    }

    #[test]
    fn test_conversion_preserves_fields() {
        let entity = test_entity();
        let stage = entity.follow_up_stage;
        let customer: Customer = entity.clone().into();

        assert_eq!(customer.id, entity.id);
        assert_eq!(customer.follow_up_stage, stage);
        assert_eq!(customer.full_name(), "Grace Hopper");
    }
}
