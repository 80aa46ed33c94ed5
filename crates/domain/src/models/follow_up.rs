//! Follow-up domain model.
//!
//! One row per scheduled outreach attempt. Rows are created lazily: stage 1
//! at customer intake, stages 2 and 3 as the previous stage completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ParseEnumError;

/// State of a single follow-up attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowUpStatus {
    Pending,
    Completed,
    Skipped,
}

impl FollowUpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpStatus::Pending => "PENDING",
            FollowUpStatus::Completed => "COMPLETED",
            FollowUpStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for FollowUpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FollowUpStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(FollowUpStatus::Pending),
            "COMPLETED" => Ok(FollowUpStatus::Completed),
            "SKIPPED" => Ok(FollowUpStatus::Skipped),
            other => Err(ParseEnumError::new("follow-up status", other)),
        }
    }
}

/// A scheduled outreach attempt for one customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Cadence stage, 1 through 3.
    pub stage: i32,
    pub status: FollowUpStatus,
    pub due_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            FollowUpStatus::Pending,
            FollowUpStatus::Completed,
            FollowUpStatus::Skipped,
        ] {
            assert_eq!(status.as_str().parse::<FollowUpStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        let err = "DONE".parse::<FollowUpStatus>().unwrap_err();
        assert!(err.to_string().contains("DONE"));
    }
}
