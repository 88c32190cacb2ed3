//! Event domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_youtube_url;

/// Who may register for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAccess {
    #[default]
    Public,
    Members,
}

impl EventAccess {
    /// Coerces a loosely-typed client value: only an exact `"members"`
    /// selects the restricted mode, anything else falls back to public.
    pub fn coerce(value: Option<&str>) -> Self {
        match value {
            Some("members") => EventAccess::Members,
            _ => EventAccess::Public,
        }
    }
}

/// Image metadata as stored by the third-party image host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventImage {
    pub url: String,
    pub public_id: String,
}

/// An event as exposed by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_start_date: Option<DateTime<Utc>>,
    pub registration_start_date: Option<DateTime<Utc>>,
    pub registration_end_date: Option<DateTime<Utc>>,
    pub access_type: EventAccess,
    pub location: Option<String>,
    pub youtube_video_url: Option<String>,
    pub cover_image: Option<EventImage>,
    pub images: Vec<EventImage>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The scheduling fields the eligibility check reads.
#[derive(Debug, Clone, Copy)]
pub struct EventSchedule {
    pub event_start_date: Option<DateTime<Utc>>,
    pub registration_start_date: Option<DateTime<Utc>>,
    pub registration_end_date: Option<DateTime<Utc>>,
    pub access_type: EventAccess,
}

impl Event {
    pub fn schedule(&self) -> EventSchedule {
        EventSchedule {
            event_start_date: self.event_start_date,
            registration_start_date: self.registration_start_date,
            registration_end_date: self.registration_end_date,
            access_type: self.access_type,
        }
    }
}

/// Request to create an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,

    /// Required; the registration window defaults to this when unset.
    pub event_start_date: DateTime<Utc>,

    pub registration_start_date: Option<DateTime<Utc>>,
    pub registration_end_date: Option<DateTime<Utc>>,

    /// Loosely typed on the wire; coerced with [`EventAccess::coerce`].
    pub access_type: Option<String>,

    pub location: Option<String>,

    #[validate(custom(function = "validate_youtube_url"))]
    pub youtube_video_url: Option<String>,

    pub cover_image: Option<EventImage>,
}

/// Request to update an event; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub event_start_date: Option<DateTime<Utc>>,
    pub registration_start_date: Option<DateTime<Utc>>,
    pub registration_end_date: Option<DateTime<Utc>>,
    pub access_type: Option<String>,
    pub location: Option<String>,

    #[validate(custom(function = "validate_youtube_url"))]
    pub youtube_video_url: Option<String>,
}

/// Request to append image metadata to an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AddEventMediaRequest {
    #[validate(length(min = 1, max = 10, message = "Between 1 and 10 images per request"))]
    pub images: Vec<EventImage>,
}

/// Response wrapping a single event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventResponse {
    pub success: bool,
    pub event: Event,
}

/// Response wrapping a list of events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventsResponse {
    pub success: bool,
    pub events: Vec<Event>,
}

/// One image in the cross-event gallery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GalleryImage {
    pub event_id: Uuid,
    pub event_title: String,
    pub url: String,
    pub public_id: String,
}

/// Response for the gallery listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GalleryResponse {
    pub success: bool,
    pub images: Vec<GalleryImage>,
}
