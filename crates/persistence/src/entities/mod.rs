//! Entity definitions (database row mappings).

pub mod admin;
pub mod contact;
pub mod event;
pub mod member;
pub mod registration;

pub use admin::AdminEntity;
pub use contact::{MembershipApplicationEntity, VolunteerApplicationEntity};
pub use event::{EventAccessDb, EventEntity, EventImageEntity, GalleryImageEntity, NewEvent};
pub use member::MemberEntity;
pub use registration::{RegistrationEntity, RegistrationWithMemberEntity};
