//! Shared utilities and common types for the GradPass backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Identity-provider access token verification
//! - Offset pagination helpers
//! - Common validation logic

pub mod jwt;
pub mod pagination;
pub mod validation;
