//! Admin repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AdminEntity;
use crate::metrics::QueryTimer;

const ADMIN_COLUMNS: &str =
    "id, username, email, password_hash, role, is_active, created_at, updated_at";

/// Repository for admin-account database operations.
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Creates a new AdminRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_username");
        let result = sqlx::query_as::<_, AdminEntity>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an admin by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_by_id");
        let result = sqlx::query_as::<_, AdminEntity>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create an admin account, used by first-run bootstrap.
    pub async fn create(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<AdminEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_admin");
        let result = sqlx::query_as::<_, AdminEntity>(&format!(
            r#"
            INSERT INTO admins (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count existing admin accounts.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_admins");
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }
}
