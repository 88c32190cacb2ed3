//! Route handlers.

pub mod admin;
pub mod contacts;
pub mod events;
pub mod health;
pub mod members;
pub mod registrations;
