//! Repository implementations.

pub mod admin;
pub mod contact;
pub mod event;
pub mod member;
pub mod registration;

pub use admin::AdminRepository;
pub use contact::ContactRepository;
pub use event::EventRepository;
pub use member::MemberRepository;
pub use registration::RegistrationRepository;
