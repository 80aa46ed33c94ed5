//! Inbound SMS webhook.
//!
//! The SMS provider POSTs form-encoded delivery callbacks here. Replies are
//! matched to customers by phone number and appended to the message log;
//! numbers that match no active customer are dropped. The provider expects
//! an empty TwiML document in response either way.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use persistence::repositories::{CustomerRepository, MessageRepository};
use shared::phone::match_key;

use crate::app::AppState;
use crate::error::ApiError;

/// Empty TwiML acknowledgment.
const TWIML_EMPTY: &str = r#"<?xml version="1.0" encoding="UTF-8"?><Response></Response>"#;

/// Provider callback fields. Field names are fixed by the provider.
#[derive(Debug, Deserialize)]
pub struct SmsWebhookPayload {
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "Body")]
    pub body: Option<String>,
    #[serde(rename = "MessageSid")]
    pub message_sid: Option<String>,
}

/// POST /api/webhooks/sms
pub async fn inbound_sms(
    State(state): State<AppState>,
    Form(payload): Form<SmsWebhookPayload>,
) -> Result<Response, ApiError> {
    let from = payload
        .from
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::validation("From is required"))?;
    let body = payload
        .body
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Body is required"))?;

    let key = match_key(from);
    let customer = CustomerRepository::new(state.pool.clone())
        .find_by_phone(&key, from)
        .await?;

    match customer {
        Some(customer) => {
            let message = MessageRepository::new(state.pool.clone())
                .record_inbound(customer.id, body, payload.message_sid.as_deref())
                .await?;

            tracing::info!(
                customer_id = %customer.id,
                message_id = %message.id,
                "Inbound message recorded"
            );
        }
        None => {
            tracing::info!(from = %from, "Inbound message from unknown number dropped");
        }
    }

    Ok(twiml_response())
}

fn twiml_response() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/xml")],
        TWIML_EMPTY,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twiml_response_shape() {
        let response = twiml_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/xml"
        );
    }

    #[test]
    fn test_twiml_body_is_empty_document() {
        assert!(TWIML_EMPTY.starts_with("<?xml"));
        assert!(TWIML_EMPTY.ends_with("<Response></Response>"));
    }

    #[test]
    fn test_payload_uses_provider_field_names() {
        let payload: SmsWebhookPayload = serde_json::from_str(
            r#"{"From":"+15551234567","Body":"Thanks","MessageSid":"SM123"}"#,
        )
        .unwrap();
        assert_eq!(payload.from.as_deref(), Some("+15551234567"));
        assert_eq!(payload.body.as_deref(), Some("Thanks"));
        assert_eq!(payload.message_sid.as_deref(), Some("SM123"));
    }

    #[test]
    fn test_payload_missing_fields_default_to_none() {
        let payload: SmsWebhookPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.from.is_none());
        assert!(payload.body.is_none());
    }
}
