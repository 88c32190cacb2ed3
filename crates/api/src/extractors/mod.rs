//! Request extractors.

pub mod admin_auth;
pub mod member_auth;

pub use admin_auth::AdminAuth;
pub use member_auth::{MemberAuth, OptionalMemberAuth};
