//! Event entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::event::{Event, EventAccess, EventImage, EventSchedule, GalleryImage};

/// Database mapping of the `event_access` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "event_access", rename_all = "lowercase")]
pub enum EventAccessDb {
    Public,
    Members,
}

impl From<EventAccess> for EventAccessDb {
    fn from(access: EventAccess) -> Self {
        match access {
            EventAccess::Public => EventAccessDb::Public,
            EventAccess::Members => EventAccessDb::Members,
        }
    }
}

impl From<EventAccessDb> for EventAccess {
    fn from(access: EventAccessDb) -> Self {
        match access {
            EventAccessDb::Public => EventAccess::Public,
            EventAccessDb::Members => EventAccess::Members,
        }
    }
}

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_start_date: Option<DateTime<Utc>>,
    pub registration_start_date: Option<DateTime<Utc>>,
    pub registration_end_date: Option<DateTime<Utc>>,
    pub access_type: EventAccessDb,
    pub location: Option<String>,
    pub youtube_video_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub cover_image_public_id: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventEntity {
    /// The scheduling fields the eligibility check reads.
    pub fn schedule(&self) -> EventSchedule {
        EventSchedule {
            event_start_date: self.event_start_date,
            registration_start_date: self.registration_start_date,
            registration_end_date: self.registration_end_date,
            access_type: self.access_type.into(),
        }
    }

    /// Assembles the API-facing model, attaching the gallery images.
    pub fn into_domain(self, images: Vec<EventImageEntity>) -> Event {
        let cover_image = match (self.cover_image_url, self.cover_image_public_id) {
            (Some(url), Some(public_id)) => Some(EventImage { url, public_id }),
            _ => None,
        };

        Event {
            id: self.id,
            title: self.title,
            description: self.description,
            event_start_date: self.event_start_date,
            registration_start_date: self.registration_start_date,
            registration_end_date: self.registration_end_date,
            access_type: self.access_type.into(),
            location: self.location,
            youtube_video_url: self.youtube_video_url,
            cover_image,
            images: images
                .into_iter()
                .map(|i| EventImage {
                    url: i.url,
                    public_id: i.public_id,
                })
                .collect(),
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Database row mapping for the event_images table.
#[derive(Debug, Clone, FromRow)]
pub struct EventImageEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub url: String,
    pub public_id: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the cross-event gallery query (covers and gallery images).
#[derive(Debug, Clone, FromRow)]
pub struct GalleryImageEntity {
    pub event_id: Uuid,
    pub event_title: String,
    pub url: String,
    pub public_id: String,
}

impl From<GalleryImageEntity> for GalleryImage {
    fn from(row: GalleryImageEntity) -> Self {
        GalleryImage {
            event_id: row.event_id,
            event_title: row.event_title,
            url: row.url,
            public_id: row.public_id,
        }
    }
}

/// Fields of a new event row.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_start_date: DateTime<Utc>,
    pub registration_start_date: DateTime<Utc>,
    pub registration_end_date: DateTime<Utc>,
    pub access_type: EventAccessDb,
    pub location: Option<String>,
    pub youtube_video_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub cover_image_public_id: Option<String>,
    pub created_by: Option<Uuid>,
}
