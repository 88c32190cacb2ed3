//! Admin entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::admin::Admin;

/// Database row mapping for the admins table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminEntity {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminEntity {
    /// Strips the password hash for API exposure.
    pub fn into_domain(self) -> Admin {
        Admin {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}
