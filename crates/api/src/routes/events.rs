//! Event CRUD, listings, and media metadata handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use domain::models::admin::MessageResponse;
use domain::models::event::{
    AddEventMediaRequest, CreateEventRequest, Event, EventAccess, EventResponse, EventsResponse,
    GalleryResponse, UpdateEventRequest,
};
use persistence::entities::{EventAccessDb, EventEntity, NewEvent};
use persistence::repositories::EventRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;

fn event_not_found() -> ApiError {
    ApiError::NotFound("Event not found.".into())
}

async fn with_images(repo: &EventRepository, entity: EventEntity) -> Result<Event, ApiError> {
    let images = repo.list_images(entity.id).await?;
    Ok(entity.into_domain(images))
}

async fn collect_with_images(
    repo: &EventRepository,
    entities: Vec<EventEntity>,
) -> Result<Vec<Event>, ApiError> {
    let mut events = Vec::with_capacity(entities.len());
    for entity in entities {
        events.push(with_images(repo, entity).await?);
    }
    Ok(events)
}

/// `POST /api/events` (admin)
pub async fn create_event(
    State(state): State<AppState>,
    admin: AdminAuth,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    body.validate()?;

    let access_type = EventAccessDb::from(EventAccess::coerce(body.access_type.as_deref()));
    let (cover_image_url, cover_image_public_id) = match body.cover_image {
        Some(image) => (Some(image.url), Some(image.public_id)),
        None => (None, None),
    };

    let new_event = NewEvent {
        title: body.title,
        description: body.description,
        event_start_date: body.event_start_date,
        // The registration window defaults to the event start when unset
        registration_start_date: body
            .registration_start_date
            .unwrap_or(body.event_start_date),
        registration_end_date: body.registration_end_date.unwrap_or(body.event_start_date),
        access_type,
        location: body.location,
        youtube_video_url: body.youtube_video_url,
        cover_image_url,
        cover_image_public_id,
        created_by: Some(admin.admin_id),
    };

    let repo = EventRepository::new(state.pool.clone());
    let entity = repo.create(&new_event).await?;
    let event = with_images(&repo, entity).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            success: true,
            event,
        }),
    ))
}

/// `GET /api/events`
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<EventsResponse>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let events = collect_with_images(&repo, repo.list_all().await?).await?;
    Ok(Json(EventsResponse {
        success: true,
        events,
    }))
}

/// `GET /api/events/upcoming`
pub async fn list_upcoming(
    State(state): State<AppState>,
) -> Result<Json<EventsResponse>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let events = collect_with_images(&repo, repo.list_upcoming(Utc::now()).await?).await?;
    Ok(Json(EventsResponse {
        success: true,
        events,
    }))
}

/// `GET /api/events/past`
pub async fn list_past(State(state): State<AppState>) -> Result<Json<EventsResponse>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let events = collect_with_images(&repo, repo.list_past(Utc::now()).await?).await?;
    Ok(Json(EventsResponse {
        success: true,
        events,
    }))
}

/// `GET /api/events/gallery`
pub async fn gallery(State(state): State<AppState>) -> Result<Json<GalleryResponse>, ApiError> {
    let images = EventRepository::new(state.pool.clone())
        .list_gallery()
        .await?;
    Ok(Json(GalleryResponse {
        success: true,
        images: images.into_iter().map(Into::into).collect(),
    }))
}

/// `GET /api/events/:event_id`
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventResponse>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());
    let entity = repo.find_by_id(event_id).await?.ok_or_else(event_not_found)?;
    let event = with_images(&repo, entity).await?;
    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

/// `PUT /api/events/:event_id` (admin)
pub async fn update_event(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(event_id): Path<Uuid>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    body.validate()?;

    let access_type = body
        .access_type
        .as_deref()
        .map(|value| EventAccessDb::from(EventAccess::coerce(Some(value))));

    let repo = EventRepository::new(state.pool.clone());
    let entity = repo
        .update(event_id, &body, access_type)
        .await?
        .ok_or_else(event_not_found)?;
    let event = with_images(&repo, entity).await?;

    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

/// `DELETE /api/events/:event_id` (admin)
///
/// Registrations stay behind as an audit trail.
pub async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = EventRepository::new(state.pool.clone())
        .delete(event_id)
        .await?;
    if deleted == 0 {
        return Err(event_not_found());
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Event deleted successfully.".to_string(),
    }))
}

/// `PATCH /api/events/:event_id/media` (admin)
pub async fn add_media(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(event_id): Path<Uuid>,
    Json(body): Json<AddEventMediaRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    body.validate()?;

    let repo = EventRepository::new(state.pool.clone());
    let entity = repo.find_by_id(event_id).await?.ok_or_else(event_not_found)?;

    repo.add_images(event_id, &body.images).await?;
    let event = with_images(&repo, entity).await?;

    Ok(Json(EventResponse {
        success: true,
        event,
    }))
}

/// `DELETE /api/events/:event_id/media/:public_id` (admin)
pub async fn delete_media(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path((event_id, public_id)): Path<(Uuid, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = EventRepository::new(state.pool.clone())
        .delete_image(event_id, &public_id)
        .await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Image not found.".into()));
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Image removed successfully.".to_string(),
    }))
}
