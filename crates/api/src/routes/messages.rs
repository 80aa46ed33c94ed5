//! Message log endpoints: conversation views, global inbox, and sending.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::{Message, MessageDirection, TemplateVars};
use persistence::entities::{MessageWithCustomerRow, MessageWithSenderRow};
use persistence::repositories::{CustomerRepository, MessageRepository, TemplateRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;
use crate::services::sms::SmsGateway;

/// Number of messages in the global inbox view.
const INBOX_LIMIT: i64 = 50;

/// A message with its sender's name, for conversation views.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub body: String,
    pub direction: MessageDirection,
    pub provider_sid: Option<String>,
    pub sent_by: Option<Uuid>,
    pub sent_at: DateTime<Utc>,
    pub sender_name: Option<String>,
}

impl From<MessageWithSenderRow> for MessageView {
    fn from(row: MessageWithSenderRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            body: row.body,
            direction: row.direction.parse().unwrap_or(MessageDirection::Outbound),
            provider_sid: row.provider_sid,
            sent_by: row.sent_by,
            sent_at: row.sent_at,
            sender_name: row.sender_name,
        }
    }
}

/// An inbox entry: a message with the customer it belongs to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxEntry {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub body: String,
    pub direction: MessageDirection,
    pub sent_at: DateTime<Utc>,
    pub sender_name: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
}

impl From<MessageWithCustomerRow> for InboxEntry {
    fn from(row: MessageWithCustomerRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            body: row.body,
            direction: row.direction.parse().unwrap_or(MessageDirection::Outbound),
            sent_at: row.sent_at,
            sender_name: row.sender_name,
            customer_name: format!("{} {}", row.customer_first_name, row.customer_last_name),
            customer_phone: row.customer_phone,
        }
    }
}

/// Query parameters for the message list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageListQuery {
    pub customer_id: Option<Uuid>,
}

/// Message list response: either one conversation or the global inbox.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageListResponse {
    Conversation { messages: Vec<MessageView> },
    Inbox { messages: Vec<InboxEntry> },
}

/// Send request: free-text body or a template resolved at send time.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub customer_id: Uuid,

    #[validate(length(min = 1, max = 1600, message = "Message body must be 1-1600 characters"))]
    pub body: Option<String>,

    pub template_id: Option<Uuid>,
}

/// GET /api/messages
///
/// With `?customerId=` returns that conversation oldest-first; without it
/// returns the most recent messages across all active customers.
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<MessageListResponse>, ApiError> {
    let repo = MessageRepository::new(state.pool.clone());

    match query.customer_id {
        Some(customer_id) => {
            let messages = repo.list_for_customer(customer_id).await?;
            Ok(Json(MessageListResponse::Conversation {
                messages: messages.into_iter().map(Into::into).collect(),
            }))
        }
        None => {
            let messages = repo.list_recent(INBOX_LIMIT).await?;
            Ok(Json(MessageListResponse::Inbox {
                messages: messages.into_iter().map(Into::into).collect(),
            }))
        }
    }
}

/// POST /api/messages/send
///
/// Records an outbound message attributed to the sender and hands it to
/// the gateway. Exactly one of `body` and `templateId` must be provided;
/// templates are rendered against the customer at send time.
pub async fn send_message(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    payload.validate()?;

    let customer = CustomerRepository::new(state.pool.clone())
        .find_by_id(payload.customer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Customer not found".into()))?;

    let body = match (&payload.body, payload.template_id) {
        (Some(_), Some(_)) => {
            return Err(ApiError::validation(
                "Provide either body or templateId, not both",
            ))
        }
        (None, None) => {
            return Err(ApiError::validation("Either body or templateId is required"))
        }
        (Some(body), None) => body.clone(),
        (None, Some(template_id)) => {
            let template = TemplateRepository::new(state.pool.clone())
                .find_by_id(template_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Template not found".into()))?;

            let template: domain::models::Template = template.into();
            template.render(&TemplateVars {
                first_name: &customer.first_name,
                last_name: &customer.last_name,
                product: &customer.product,
                company: &state.config.sms.company_name,
            })
        }
    };

    let message = MessageRepository::new(state.pool.clone())
        .record_outbound(customer.id, &body, session.user_id)
        .await?;

    SmsGateway::new(&state.config.sms).send(&customer.phone, &body);

    tracing::info!(
        customer_id = %customer.id,
        message_id = %message.id,
        "Outbound message recorded"
    );

    Ok((StatusCode::CREATED, Json(message.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_body_length() {
        let req = SendMessageRequest {
            customer_id: Uuid::new_v4(),
            body: Some("x".repeat(1601)),
            template_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_send_request_valid_body() {
        let req = SendMessageRequest {
            customer_id: Uuid::new_v4(),
            body: Some("How is the new fridge?".to_string()),
            template_id: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_message_view_from_row() {
        let row = MessageWithSenderRow {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            body: "Thanks!".to_string(),
            direction: "INBOUND".to_string(),
            provider_sid: Some("SM123".to_string()),
            sent_by: None,
            sent_at: Utc::now(),
            sender_name: None,
        };
        let view: MessageView = row.into();
        assert_eq!(view.direction, MessageDirection::Inbound);
        assert!(view.sender_name.is_none());
    }

    #[test]
    fn test_inbox_entry_builds_customer_name() {
        let row = MessageWithCustomerRow {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            body: "Hi".to_string(),
            direction: "OUTBOUND".to_string(),
            sent_at: Utc::now(),
            sender_name: Some("Staff Member".to_string()),
            customer_first_name: "Ada".to_string(),
            customer_last_name: "Lovelace".to_string(),
            customer_phone: "5551234567".to_string(),
        };
        let entry: InboxEntry = row.into();
        assert_eq!(entry.customer_name, "Ada Lovelace");
    }

    #[test]
    fn test_conversation_response_shape() {
        let json = serde_json::to_string(&MessageListResponse::Conversation {
            messages: Vec::new(),
        })
        .unwrap();
        assert_eq!(json, r#"{"messages":[]}"#);
    }
}
