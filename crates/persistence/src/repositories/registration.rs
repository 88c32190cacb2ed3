//! Registration repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RegistrationEntity, RegistrationWithMemberEntity};
use crate::metrics::QueryTimer;

/// Repository for event-registration database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Creates a new RegistrationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a member's registration for an event.
    pub async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_user");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, event_id, user_id, email, name, registration_timestamp
            FROM registrations
            WHERE event_id = $1 AND user_id = $2
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a guest's registration for an event by email.
    pub async fn find_by_event_and_email(
        &self,
        event_id: Uuid,
        email: &str,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_registration_by_email");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, event_id, user_id, email, name, registration_timestamp
            FROM registrations
            WHERE event_id = $1 AND email = $2
            "#,
        )
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a registration row.
    ///
    /// Callers are expected to check for an existing registration first;
    /// the partial unique indexes on (event_id, user_id) and
    /// (event_id, email) still back-stop concurrent inserts, which surface
    /// as a unique violation here.
    pub async fn insert(
        &self,
        event_id: Uuid,
        user_id: Option<Uuid>,
        email: Option<&str>,
        name: Option<&str>,
        registered_at: DateTime<Utc>,
    ) -> Result<RegistrationEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_registration");
        let result = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            INSERT INTO registrations (event_id, user_id, email, name, registration_timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, user_id, email, name, registration_timestamp
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .bind(email)
        .bind(name)
        .bind(registered_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List an event's registrations with member emails joined in,
    /// newest first.
    pub async fn list_for_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<RegistrationWithMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_registrations_for_event");
        let result = sqlx::query_as::<_, RegistrationWithMemberEntity>(
            r#"
            SELECT r.id, r.event_id, r.user_id, r.email, r.name, r.registration_timestamp,
                   m.email AS member_email
            FROM registrations r
            LEFT JOIN members m ON r.user_id = m.id
            WHERE r.event_id = $1
            ORDER BY r.registration_timestamp DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
