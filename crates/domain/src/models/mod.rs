//! Domain models.

pub mod customer;
pub mod dashboard;
pub mod follow_up;
pub mod message;
pub mod template;
pub mod user;

pub use customer::{Customer, CustomerFilter, ReviewPlatform, ReviewStatus};
pub use dashboard::{DashboardOverview, DashboardStats, DueFollowUp, RecentCustomer};
pub use follow_up::{FollowUp, FollowUpStatus};
pub use message::{Message, MessageDirection};
pub use template::{Template, TemplateVars};
pub use user::{User, UserRole};

use thiserror::Error;

/// Error returned when a stored enum value cannot be parsed.
#[derive(Debug, Error)]
#[error("Unknown {kind} value: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
