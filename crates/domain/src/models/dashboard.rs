//! Dashboard aggregate models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{FollowUpStatus, ReviewStatus};

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Non-archived customers.
    pub total_customers: i64,
    /// Non-archived customers who left a review.
    pub reviewed_customers: i64,
    /// PENDING follow-ups that are due now or overdue.
    pub pending_follow_ups: i64,
    /// Customers who exhausted all stages without a review.
    pub never_reviewed: i64,
    /// Reviewed share of customers, rounded to a whole percent.
    pub review_rate: i64,
}

impl DashboardStats {
    /// Rounded review percentage; zero customers yields zero rather than
    /// a division error.
    pub fn review_rate(reviewed: i64, total: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        ((reviewed as f64 / total as f64) * 100.0).round() as i64
    }
}

/// A due follow-up with enough customer context to act on it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueFollowUp {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub stage: i32,
    pub status: FollowUpStatus,
    pub due_date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_phone: String,
    pub product: String,
}

/// Customer summary for the recent-intake list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCustomer {
    pub id: Uuid,
    pub name: String,
    pub product: String,
    pub city: String,
    pub review_status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

/// Full dashboard payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub pending_follow_ups: Vec<DueFollowUp>,
    pub recent_customers: Vec<RecentCustomer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_rate_rounds() {
        assert_eq!(DashboardStats::review_rate(1, 3), 33);
        assert_eq!(DashboardStats::review_rate(2, 3), 67);
        assert_eq!(DashboardStats::review_rate(1, 2), 50);
    }

    #[test]
    fn test_review_rate_no_customers() {
        assert_eq!(DashboardStats::review_rate(0, 0), 0);
    }

    #[test]
    fn test_review_rate_all_reviewed() {
        assert_eq!(DashboardStats::review_rate(7, 7), 100);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = DashboardStats::default();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("totalCustomers"));
        assert!(json.contains("reviewRate"));
        assert!(json.contains("neverReviewed"));
    }
}
