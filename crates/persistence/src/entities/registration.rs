//! Registration entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::registration::Registration;

/// Database row mapping for the registrations table.
///
/// `event_id` is deliberately not a foreign key: deleting an event keeps
/// its registrations as an audit trail.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub registration_timestamp: DateTime<Utc>,
}

impl From<RegistrationEntity> for Registration {
    fn from(row: RegistrationEntity) -> Self {
        Registration {
            id: row.id,
            event_id: row.event_id,
            user_id: row.user_id,
            email: row.email,
            name: row.name,
            registration_timestamp: row.registration_timestamp,
        }
    }
}

/// Registration row with the member's account email joined in, for the
/// admin listing.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationWithMemberEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub registration_timestamp: DateTime<Utc>,
    // Member info
    pub member_email: Option<String>,
}
