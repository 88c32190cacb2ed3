//! Domain models.

pub mod admin;
pub mod contact;
pub mod event;
pub mod member;
pub mod registration;
