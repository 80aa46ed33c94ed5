//! Shared utilities and common types for the Review Loop backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Password hashing with Argon2id
//! - Session token issuing and verification
//! - Phone number normalization for SMS matching
//! - Offset pagination helpers
//! - Common validation logic

pub mod pagination;
pub mod password;
pub mod phone;
pub mod session;
pub mod validation;
