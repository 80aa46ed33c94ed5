//! Message template endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use domain::models::Template;
use persistence::repositories::TemplateRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;

/// Template create request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 1600, message = "Body must be 1-1600 characters"))]
    pub body: String,
}

/// Template partial update.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 1600, message = "Body must be 1-1600 characters"))]
    pub body: Option<String>,

    pub is_active: Option<bool>,
}

/// GET /api/templates
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Template>>, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());
    let templates = repo.list().await?;
    Ok(Json(templates.into_iter().map(Into::into).collect()))
}

/// POST /api/templates
pub async fn create_template(
    State(state): State<AppState>,
    Json(payload): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    payload.validate()?;

    let repo = TemplateRepository::new(state.pool.clone());
    let template = repo.create(&payload.name, &payload.body).await?;

    Ok((StatusCode::CREATED, Json(template.into())))
}

/// GET /api/templates/:id
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Template>, ApiError> {
    let repo = TemplateRepository::new(state.pool.clone());

    let template = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".into()))?;

    Ok(Json(template.into()))
}

/// PATCH /api/templates/:id
pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTemplateRequest>,
) -> Result<Json<Template>, ApiError> {
    payload.validate()?;

    let repo = TemplateRepository::new(state.pool.clone());

    let template = repo
        .update(
            id,
            payload.name.as_deref(),
            payload.body.as_deref(),
            payload.is_active,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".into()))?;

    Ok(Json(template.into()))
}

/// DELETE /api/templates/:id
///
/// Admin-only; staff can deactivate a template through PATCH instead.
pub async fn delete_template(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !session.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".into()));
    }

    let repo = TemplateRepository::new(state.pool.clone());

    if repo.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Template not found".into()));
    }

    tracing::info!(template_id = %id, "Template deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_rejects_empty_name() {
        let req = CreateTemplateRequest {
            name: String::new(),
            body: "Hi {{firstName}}".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_oversized_body() {
        let req = CreateTemplateRequest {
            name: "Long".to_string(),
            body: "x".repeat(1601),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_accepts_valid() {
        let req = CreateTemplateRequest {
            name: "First follow-up".to_string(),
            body: "Hi {{firstName}}, how is your {{product}}?".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_request_empty_is_valid() {
        assert!(UpdateTemplateRequest::default().validate().is_ok());
    }

    #[test]
    fn test_update_request_validates_present_name() {
        let req = UpdateTemplateRequest {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
