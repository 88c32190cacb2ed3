//! Domain layer for the club site backend.
//!
//! This crate contains:
//! - Domain models (Event, Registration, Member, Admin, contact forms)
//! - The pure registration-eligibility and anti-spam rules
//! - Request/response types shared with the HTTP layer

pub mod models;
