//! Customer domain model.
//!
//! A customer is the aggregate root of the follow-up cadence: stage and
//! review state live on the customer row, individual outreach attempts are
//! `FollowUp` children.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ParseEnumError;

/// Whether the customer has left an external review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    None,
    LeftReview,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::None => "NONE",
            ReviewStatus::LeftReview => "LEFT_REVIEW",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(ReviewStatus::None),
            "LEFT_REVIEW" => Ok(ReviewStatus::LeftReview),
            other => Err(ParseEnumError::new("review status", other)),
        }
    }
}

/// Platform the customer reviewed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewPlatform {
    Google,
    Yelp,
    Facebook,
    Other,
}

impl ReviewPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewPlatform::Google => "GOOGLE",
            ReviewPlatform::Yelp => "YELP",
            ReviewPlatform::Facebook => "FACEBOOK",
            ReviewPlatform::Other => "OTHER",
        }
    }
}

impl fmt::Display for ReviewPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewPlatform {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GOOGLE" => Ok(ReviewPlatform::Google),
            "YELP" => Ok(ReviewPlatform::Yelp),
            "FACEBOOK" => Ok(ReviewPlatform::Facebook),
            "OTHER" => Ok(ReviewPlatform::Other),
            other => Err(ParseEnumError::new("review platform", other)),
        }
    }
}

/// List filter for the customers endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerFilter {
    #[default]
    All,
    /// In the cadence: no review yet, not all stages used.
    Pending,
    /// Left a review.
    Reviewed,
    /// Exhausted all stages without a review.
    NoReview,
}

impl CustomerFilter {
    /// Stable string form, used as a query parameter in SQL.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerFilter::All => "all",
            CustomerFilter::Pending => "pending",
            CustomerFilter::Reviewed => "reviewed",
            CustomerFilter::NoReview => "no-review",
        }
    }
}

/// A customer who purchased an appliance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
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
    /// Highest follow-up stage reached so far (0 before any completion).
    pub follow_up_stage: i32,
    pub review_status: ReviewStatus,
    pub review_platform: Option<ReviewPlatform>,
    pub next_follow_up_date: Option<DateTime<Utc>>,
    pub is_archived: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
