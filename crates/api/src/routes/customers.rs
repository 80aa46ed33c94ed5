//! Customer endpoints: intake, search, detail, update, archive.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain::models::{Customer, CustomerFilter, FollowUp};
use persistence::repositories::{CustomerRepository, FollowUpRepository, MessageRepository, NewCustomer};
use shared::pagination::{PageInfo, PageParams};
use shared::validation::{validate_not_blank, validate_phone};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Session;
use crate::routes::messages::MessageView;

/// Query parameters for the customer list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub filter: Option<CustomerFilter>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Paginated customer list response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListResponse {
    pub customers: Vec<Customer>,
    pub pagination: PageInfo,
}

/// Customer intake request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(custom(function = validate_not_blank, message = "First name is required"))]
    pub first_name: String,

    #[validate(custom(function = validate_not_blank, message = "Last name is required"))]
    pub last_name: String,

    #[validate(custom(function = validate_phone))]
    pub phone: String,

    #[validate(email(message = "Valid email is required"))]
    pub email: Option<String>,

    #[validate(custom(function = validate_not_blank, message = "Address is required"))]
    pub address: String,

    #[validate(custom(function = validate_not_blank, message = "City is required"))]
    pub city: String,

    #[validate(custom(function = validate_not_blank, message = "Product is required"))]
    pub product: String,

    pub purchase_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,

    pub special_note: Option<String>,
}

/// Intake response: the new customer and its scheduled first follow-up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerResponse {
    pub customer: Customer,
    pub follow_up: FollowUp,
}

/// Partial customer update. Stage and review state are never writable here.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[validate(custom(function = validate_not_blank, message = "First name is required"))]
    pub first_name: Option<String>,

    #[validate(custom(function = validate_not_blank, message = "Last name is required"))]
    pub last_name: Option<String>,

    #[validate(custom(function = validate_phone))]
    pub phone: Option<String>,

    #[validate(email(message = "Valid email is required"))]
    pub email: Option<String>,

    pub address: Option<String>,
    pub city: Option<String>,

    #[validate(custom(function = validate_not_blank, message = "Product is required"))]
    pub product: Option<String>,

    pub special_note: Option<String>,
}

/// Customer detail: the record with its conversation and cadence history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailResponse {
    pub customer: Customer,
    pub messages: Vec<MessageView>,
    pub follow_ups: Vec<FollowUp>,
}

/// GET /api/customers
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerListQuery>,
) -> Result<Json<CustomerListResponse>, ApiError> {
    let repo = CustomerRepository::new(state.pool.clone());

    let search = query.search.as_deref().unwrap_or("").trim().to_string();
    let filter = query.filter.unwrap_or_default();
    let params = PageParams {
        page: query.page,
        limit: query.limit,
    };

    let total = repo.count(&search, filter).await?;
    let customers = repo
        .list(&search, filter, i64::from(params.limit()), params.offset())
        .await?;

    Ok(Json(CustomerListResponse {
        customers: customers.into_iter().map(Into::into).collect(),
        pagination: PageInfo::new(&params, total),
    }))
}

/// POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CreateCustomerResponse>), ApiError> {
    payload.validate()?;

    let repo = CustomerRepository::new(state.pool.clone());

    let new = NewCustomer {
        first_name: payload.first_name.trim().to_string(),
        last_name: payload.last_name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        email: payload.email,
        address: payload.address,
        city: payload.city,
        product: payload.product,
        purchase_date: payload.purchase_date,
        delivery_date: payload.delivery_date,
        special_note: payload.special_note,
        created_by: Some(session.user_id),
    };

    let (customer, follow_up) = repo.create(&new).await?;

    tracing::info!(customer_id = %customer.id, "Customer created");

    Ok((
        StatusCode::CREATED,
        Json(CreateCustomerResponse {
            customer: customer.into(),
            follow_up: follow_up.into(),
        }),
    ))
}

/// GET /api/customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerDetailResponse>, ApiError> {
    let customers = CustomerRepository::new(state.pool.clone());

    let customer = customers
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Customer not found".into()))?;

    let messages = MessageRepository::new(state.pool.clone())
        .list_for_customer(id)
        .await?;
    let follow_ups = FollowUpRepository::new(state.pool.clone())
        .list_by_customer(id)
        .await?;

    Ok(Json(CustomerDetailResponse {
        customer: customer.into(),
        messages: messages.into_iter().map(MessageView::from).collect(),
        follow_ups: follow_ups.into_iter().map(Into::into).collect(),
    }))
}

/// PATCH /api/customers/:id
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    payload.validate()?;

    let repo = CustomerRepository::new(state.pool.clone());

    let updated = repo
        .update(
            id,
            payload.first_name.as_deref(),
            payload.last_name.as_deref(),
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.address.as_deref(),
            payload.city.as_deref(),
            payload.product.as_deref(),
            payload.special_note.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Customer not found".into()))?;

    Ok(Json(updated.into()))
}

/// DELETE /api/customers/:id
///
/// Archives the customer; the record and its history stay queryable by id
/// but disappear from lists, matching, and the dashboard.
pub async fn archive_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CustomerRepository::new(state.pool.clone());

    if repo.archive(id).await? == 0 {
        return Err(ApiError::NotFound("Customer not found".into()));
    }

    tracing::info!(customer_id = %id, "Customer archived");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateCustomerRequest {
        use fake::faker::internet::en::SafeEmail;
        use fake::Fake;

        CreateCustomerRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            email: Some(SafeEmail().fake()),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            product: "Range".to_string(),
            purchase_date: Utc::now(),
            delivery_date: Utc::now(),
            special_note: None,
        }
    }

    #[test]
    fn test_create_request_accepts_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_blank_name() {
        let mut req = valid_request();
        req.first_name = "   ".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_short_phone() {
        let mut req = valid_request();
        req.phone = "555-1234".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_email_optional() {
        let mut req = valid_request();
        req.email = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_request_empty_is_valid() {
        assert!(UpdateCustomerRequest::default().validate().is_ok());
    }

    #[test]
    fn test_update_request_validates_present_fields() {
        let req = UpdateCustomerRequest {
            phone: Some("123".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_list_query_deserializes_filter() {
        let query: CustomerListQuery =
            serde_json::from_str(r#"{"filter":"no-review","page":2}"#).unwrap();
        assert_eq!(query.filter, Some(CustomerFilter::NoReview));
        assert_eq!(query.page, Some(2));
    }
}
