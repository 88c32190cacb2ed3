//! Contact-form repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::contact::{CreateMembershipRequest, CreateVolunteerRequest};

use crate::entities::{MembershipApplicationEntity, VolunteerApplicationEntity};
use crate::metrics::QueryTimer;

/// Repository for membership and volunteer applications.
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Creates a new ContactRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a membership application.
    pub async fn create_membership(
        &self,
        application: &CreateMembershipRequest,
    ) -> Result<MembershipApplicationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_membership_application");
        let result = sqlx::query_as::<_, MembershipApplicationEntity>(
            r#"
            INSERT INTO membership_applications (name, email, phone, year, interests, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, phone, year, interests, message, created_at
            "#,
        )
        .bind(&application.name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.year)
        .bind(&application.interests)
        .bind(&application.message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List membership applications, newest first.
    pub async fn list_memberships(
        &self,
    ) -> Result<Vec<MembershipApplicationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_membership_applications");
        let result = sqlx::query_as::<_, MembershipApplicationEntity>(
            r#"
            SELECT id, name, email, phone, year, interests, message, created_at
            FROM membership_applications
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a membership application.
    pub async fn delete_membership(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_membership_application");
        let result = sqlx::query("DELETE FROM membership_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Store a volunteer application.
    pub async fn create_volunteer(
        &self,
        application: &CreateVolunteerRequest,
    ) -> Result<VolunteerApplicationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_volunteer_application");
        let result = sqlx::query_as::<_, VolunteerApplicationEntity>(
            r#"
            INSERT INTO volunteer_applications (name, email, phone, year, interest_area, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, phone, year, interest_area, message, created_at
            "#,
        )
        .bind(&application.name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.year)
        .bind(&application.interest_area)
        .bind(&application.message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List volunteer applications, newest first.
    pub async fn list_volunteers(
        &self,
    ) -> Result<Vec<VolunteerApplicationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_volunteer_applications");
        let result = sqlx::query_as::<_, VolunteerApplicationEntity>(
            r#"
            SELECT id, name, email, phone, year, interest_area, message, created_at
            FROM volunteer_applications
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a volunteer application.
    pub async fn delete_volunteer(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_volunteer_application");
        let result = sqlx::query("DELETE FROM volunteer_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
