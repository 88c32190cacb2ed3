//! Member entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::member::Member;

/// Database row mapping for the members table.
#[derive(Debug, Clone, FromRow)]
pub struct MemberEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberEntity {
    /// Strips the password hash for API exposure.
    pub fn into_domain(self) -> Member {
        Member {
            id: self.id,
            email: self.email,
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}
