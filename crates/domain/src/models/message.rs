//! SMS message domain model.
//!
//! Messages are an append-only log: once recorded they are never updated
//! or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ParseEnumError;

/// Direction of an SMS relative to the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

impl MessageDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageDirection::Inbound => "INBOUND",
            MessageDirection::Outbound => "OUTBOUND",
        }
    }
}

impl fmt::Display for MessageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageDirection {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INBOUND" => Ok(MessageDirection::Inbound),
            "OUTBOUND" => Ok(MessageDirection::Outbound),
            other => Err(ParseEnumError::new("message direction", other)),
        }
    }
}

/// One SMS tied to a customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub body: String,
    pub direction: MessageDirection,
    /// Gateway message ID, inbound only.
    pub provider_sid: Option<String>,
    /// Staff user who sent it, outbound only.
    pub sent_by: Option<Uuid>,
    pub sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_roundtrip() {
        for direction in [MessageDirection::Inbound, MessageDirection::Outbound] {
            assert_eq!(
                direction.as_str().parse::<MessageDirection>().unwrap(),
                direction
            );
        }
    }

    #[test]
    fn test_direction_serializes_screaming_snake() {
        let json = serde_json::to_string(&MessageDirection::Inbound).unwrap();
        assert_eq!(json, "\"INBOUND\"");
    }
}
