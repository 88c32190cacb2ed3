//! Event repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domain::models::event::{EventImage, UpdateEventRequest};

use crate::entities::{EventAccessDb, EventEntity, EventImageEntity, GalleryImageEntity, NewEvent};
use crate::metrics::QueryTimer;

const EVENT_COLUMNS: &str = "id, title, description, event_start_date, registration_start_date, \
     registration_end_date, access_type, location, youtube_video_url, cover_image_url, \
     cover_image_public_id, created_by, created_at, updated_at";

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event.
    pub async fn create(&self, event: &NewEvent) -> Result<EventEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            INSERT INTO events (title, description, event_start_date, registration_start_date,
                registration_end_date, access_type, location, youtube_video_url,
                cover_image_url, cover_image_public_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_start_date)
        .bind(event.registration_start_date)
        .bind(event.registration_end_date)
        .bind(event.access_type)
        .bind(&event.location)
        .bind(&event.youtube_video_url)
        .bind(&event.cover_image_url)
        .bind(&event.cover_image_public_id)
        .bind(event.created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all events, soonest first; undated events sort last.
    pub async fn list_all(&self) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_events");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             ORDER BY event_start_date ASC NULLS LAST, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List events starting at or after `now`, soonest first.
    pub async fn list_upcoming(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_upcoming_events");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE event_start_date >= $1 \
             ORDER BY event_start_date ASC"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List events that started before `now`, most recent first.
    pub async fn list_past(&self, now: DateTime<Utc>) -> Result<Vec<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_past_events");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE event_start_date < $1 \
             ORDER BY event_start_date DESC"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Partially update an event; absent fields are left unchanged.
    pub async fn update(
        &self,
        id: Uuid,
        changes: &UpdateEventRequest,
        access_type: Option<EventAccessDb>,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_start_date = COALESCE($4, event_start_date),
                registration_start_date = COALESCE($5, registration_start_date),
                registration_end_date = COALESCE($6, registration_end_date),
                access_type = COALESCE($7, access_type),
                location = COALESCE($8, location),
                youtube_video_url = COALESCE($9, youtube_video_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.event_start_date)
        .bind(changes.registration_start_date)
        .bind(changes.registration_end_date)
        .bind(access_type)
        .bind(&changes.location)
        .bind(&changes.youtube_video_url)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an event. Registrations are left in place (audit trail);
    /// only the event's own image rows are removed, via cascade.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Append image metadata records to an event.
    pub async fn add_images(
        &self,
        event_id: Uuid,
        images: &[EventImage],
    ) -> Result<Vec<EventImageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("add_event_images");
        let mut inserted = Vec::with_capacity(images.len());
        for image in images {
            let row = sqlx::query_as::<_, EventImageEntity>(
                r#"
                INSERT INTO event_images (event_id, url, public_id)
                VALUES ($1, $2, $3)
                RETURNING id, event_id, url, public_id, created_at
                "#,
            )
            .bind(event_id)
            .bind(&image.url)
            .bind(&image.public_id)
            .fetch_one(&self.pool)
            .await?;
            inserted.push(row);
        }
        timer.record();
        Ok(inserted)
    }

    /// List an event's gallery images, oldest first.
    pub async fn list_images(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<EventImageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_event_images");
        let result = sqlx::query_as::<_, EventImageEntity>(
            r#"
            SELECT id, event_id, url, public_id, created_at
            FROM event_images
            WHERE event_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove one image record by its host-side public id.
    pub async fn delete_image(
        &self,
        event_id: Uuid,
        public_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event_image");
        let result = sqlx::query("DELETE FROM event_images WHERE event_id = $1 AND public_id = $2")
            .bind(event_id)
            .bind(public_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// All images across events (covers and gallery images), newest
    /// events first.
    pub async fn list_gallery(&self) -> Result<Vec<GalleryImageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_gallery_images");
        let result = sqlx::query_as::<_, GalleryImageEntity>(
            r#"
            SELECT event_id, event_title, url, public_id FROM (
                SELECT e.id AS event_id, e.title AS event_title,
                       e.cover_image_url AS url, e.cover_image_public_id AS public_id,
                       e.created_at AS event_created_at, 0 AS ordinal
                FROM events e
                WHERE e.cover_image_url IS NOT NULL
                  AND e.cover_image_public_id IS NOT NULL
                UNION ALL
                SELECT e.id, e.title, i.url, i.public_id, e.created_at, 1
                FROM event_images i
                JOIN events e ON i.event_id = e.id
            ) gallery
            ORDER BY event_created_at DESC, ordinal ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
