//! Domain services.

pub mod cadence;
