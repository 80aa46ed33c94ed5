//! Dashboard endpoint.

use axum::{extract::State, Json};

use domain::models::DashboardOverview;
use persistence::repositories::DashboardRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/dashboard
///
/// Headline counts, the ten most overdue pending follow-ups, and the five
/// most recent customers.
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardOverview>, ApiError> {
    let repo = DashboardRepository::new(state.pool.clone());
    let overview = repo.get_overview().await?;
    Ok(Json(overview))
}
