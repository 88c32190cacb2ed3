//! Contact-form entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::contact::{MembershipApplication, VolunteerApplication};

/// Database row mapping for the membership_applications table.
#[derive(Debug, Clone, FromRow)]
pub struct MembershipApplicationEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub year: String,
    pub interests: Vec<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<MembershipApplicationEntity> for MembershipApplication {
    fn from(row: MembershipApplicationEntity) -> Self {
        MembershipApplication {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            year: row.year,
            interests: row.interests,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// Database row mapping for the volunteer_applications table.
#[derive(Debug, Clone, FromRow)]
pub struct VolunteerApplicationEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub year: String,
    pub interest_area: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<VolunteerApplicationEntity> for VolunteerApplication {
    fn from(row: VolunteerApplicationEntity) -> Self {
        VolunteerApplication {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            year: row.year,
            interest_area: row.interest_area,
            message: row.message,
            created_at: row.created_at,
        }
    }
}
