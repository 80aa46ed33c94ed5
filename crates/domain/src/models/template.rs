//! Message template domain model.
//!
//! Templates hold reusable SMS text with placeholder tokens that are
//! resolved against a customer at send time. Supported tokens:
//! `{{firstName}}`, `{{lastName}}`, `{{product}}`, `{{company}}`.
//! Unknown tokens are left intact so a typo is visible rather than
//! silently swallowed.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A reusable message template.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub body: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values substituted into a template at send time.
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub product: &'a str,
    pub company: &'a str,
}

impl Template {
    /// Renders the template body against the given values.
    pub fn render(&self, vars: &TemplateVars<'_>) -> String {
        render_body(&self.body, vars)
    }
}

/// Renders placeholder tokens in a message body.
pub fn render_body(body: &str, vars: &TemplateVars<'_>) -> String {
    body.replace("{{firstName}}", vars.first_name)
        .replace("{{lastName}}", vars.last_name)
        .replace("{{product}}", vars.product)
        .replace("{{company}}", vars.company)
}
