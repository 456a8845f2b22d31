//! Domain layer for the GradPass backend.
//!
//! This crate contains:
//! - Domain models (User, Guest, Graduate, QrCode)
//! - The redemption state machine and its wire types

pub mod models;
