//! Shared utilities and common types for the club site backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT token generation and validation
//! - Password hashing with Argon2id
//! - Common validation and normalization helpers

pub mod jwt;
pub mod password;
pub mod validation;
