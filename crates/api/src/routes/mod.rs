//! HTTP route handlers.

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod follow_ups;
pub mod health;
pub mod messages;
pub mod templates;
pub mod users;
pub mod webhooks;
