//! Domain layer for the Review Loop backend.
//!
//! Contains the domain models (customers, follow-ups, messages, templates,
//! staff users, dashboard aggregates) and the pure follow-up cadence logic.
//! Nothing here touches the database or HTTP.

pub mod models;
pub mod services;
