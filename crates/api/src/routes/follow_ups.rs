//! Follow-up action endpoint.
//!
//! One endpoint drives the cadence: complete, skip, or mark the customer
//! as reviewed. Validation happens before any mutation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::models::{Customer, FollowUp, ReviewPlatform};
use persistence::repositories::{
    CompletionOutcome, FollowUpRepository, ReviewOutcome, SkipOutcome,
};

use crate::app::AppState;
use crate::error::ApiError;

/// Cadence action requested by staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FollowUpAction {
    Complete,
    Skip,
    MarkReviewed,
}

/// Follow-up action request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpActionRequest {
    pub action: FollowUpAction,
    pub customer_id: Uuid,
    /// Required for complete and skip.
    pub follow_up_id: Option<Uuid>,
    pub feedback: Option<String>,
    /// Platform for mark-reviewed; defaults to Google.
    pub platform: Option<ReviewPlatform>,
}

/// Follow-up action response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpActionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUp>,
    /// The newly scheduled stage after a completion, when any remains.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<FollowUp>,
}

/// POST /api/followups
pub async fn follow_up_action(
    State(state): State<AppState>,
    Json(payload): Json<FollowUpActionRequest>,
) -> Result<Json<FollowUpActionResponse>, ApiError> {
    let repo = FollowUpRepository::new(state.pool.clone());

    match payload.action {
        FollowUpAction::Complete => {
            let follow_up_id = require_follow_up_id(&payload)?;
            ensure_belongs_to_customer(&repo, follow_up_id, payload.customer_id).await?;

            match repo.complete(follow_up_id, payload.feedback.as_deref()).await? {
                CompletionOutcome::NotFound => {
                    Err(ApiError::NotFound("Follow-up not found".into()))
                }
                CompletionOutcome::AlreadyClosed => Err(ApiError::Conflict(
                    "Follow-up has already been completed or skipped".into(),
                )),
                CompletionOutcome::Advanced {
                    customer,
                    completed,
                    next,
                } => {
                    tracing::info!(
                        customer_id = %customer.id,
                        stage = completed.stage,
                        "Follow-up completed"
                    );
                    Ok(Json(FollowUpActionResponse {
                        customer: Some(customer.into()),
                        follow_up: Some(completed.into()),
                        next_follow_up: next.map(Into::into),
                    }))
                }
            }
        }
        FollowUpAction::Skip => {
            let follow_up_id = require_follow_up_id(&payload)?;
            ensure_belongs_to_customer(&repo, follow_up_id, payload.customer_id).await?;

            match repo.skip(follow_up_id, payload.feedback.as_deref()).await? {
                SkipOutcome::NotFound => Err(ApiError::NotFound("Follow-up not found".into())),
                SkipOutcome::AlreadyClosed => Err(ApiError::Conflict(
                    "Follow-up has already been completed or skipped".into(),
                )),
                SkipOutcome::Skipped(follow_up) => {
                    tracing::info!(
                        customer_id = %payload.customer_id,
                        stage = follow_up.stage,
                        "Follow-up skipped"
                    );
                    Ok(Json(FollowUpActionResponse {
                        customer: None,
                        follow_up: Some(follow_up.into()),
                        next_follow_up: None,
                    }))
                }
            }
        }
        FollowUpAction::MarkReviewed => {
            let platform = payload.platform.unwrap_or(ReviewPlatform::Google);

            match repo.mark_reviewed(payload.customer_id, platform).await? {
                ReviewOutcome::NotFound => Err(ApiError::NotFound("Customer not found".into())),
                ReviewOutcome::Marked {
                    customer,
                    closed_follow_ups,
                } => {
                    tracing::info!(
                        customer_id = %customer.id,
                        platform = %platform,
                        closed_follow_ups,
                        "Customer marked as reviewed"
                    );
                    Ok(Json(FollowUpActionResponse {
                        customer: Some(customer.into()),
                        follow_up: None,
                        next_follow_up: None,
                    }))
                }
            }
        }
    }
}

fn require_follow_up_id(payload: &FollowUpActionRequest) -> Result<Uuid, ApiError> {
    payload
        .follow_up_id
        .ok_or_else(|| ApiError::validation("followUpId is required for this action"))
}

/// A follow-up id from one customer cannot act on another customer's row.
async fn ensure_belongs_to_customer(
    repo: &FollowUpRepository,
    follow_up_id: Uuid,
    customer_id: Uuid,
) -> Result<(), ApiError> {
    match repo.find_by_id(follow_up_id).await? {
        Some(follow_up) if follow_up.customer_id == customer_id => Ok(()),
        _ => Err(ApiError::NotFound("Follow-up not found".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_deserializes_kebab_case() {
        let req: FollowUpActionRequest = serde_json::from_str(
            r#"{"action":"mark-reviewed","customerId":"550e8400-e29b-41d4-a716-446655440000","platform":"YELP"}"#,
        )
        .unwrap();
        assert_eq!(req.action, FollowUpAction::MarkReviewed);
        assert_eq!(req.platform, Some(ReviewPlatform::Yelp));
    }

    #[test]
    fn test_action_complete_with_feedback() {
        let req: FollowUpActionRequest = serde_json::from_str(
            r#"{"action":"complete","customerId":"550e8400-e29b-41d4-a716-446655440000","followUpId":"550e8400-e29b-41d4-a716-446655440001","feedback":"Spoke to customer"}"#,
        )
        .unwrap();
        assert_eq!(req.action, FollowUpAction::Complete);
        assert!(req.follow_up_id.is_some());
        assert_eq!(req.feedback.as_deref(), Some("Spoke to customer"));
    }

    #[test]
    fn test_action_rejects_unknown() {
        let result: Result<FollowUpActionRequest, _> = serde_json::from_str(
            r#"{"action":"escalate","customerId":"550e8400-e29b-41d4-a716-446655440000"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_require_follow_up_id_missing() {
        let req = FollowUpActionRequest {
            action: FollowUpAction::Complete,
            customer_id: Uuid::new_v4(),
            follow_up_id: None,
            feedback: None,
            platform: None,
        };
        assert!(require_follow_up_id(&req).is_err());
    }
}
