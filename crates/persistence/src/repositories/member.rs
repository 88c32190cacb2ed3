//! Member repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::MemberEntity;
use crate::metrics::QueryTimer;

const MEMBER_COLUMNS: &str =
    "id, email, password_hash, role, is_active, created_at, updated_at";

/// Repository for member-account database operations.
#[derive(Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Creates a new MemberRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a member by normalized email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<MemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_member_by_email");
        let result = sqlx::query_as::<_, MemberEntity>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a member by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_member_by_id");
        let result = sqlx::query_as::<_, MemberEntity>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all member accounts, newest first.
    pub async fn list_all(&self) -> Result<Vec<MemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_members");
        let result = sqlx::query_as::<_, MemberEntity>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a member account. A duplicate email surfaces as a unique
    /// violation.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<MemberEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_member");
        let result = sqlx::query_as::<_, MemberEntity>(&format!(
            r#"
            INSERT INTO members (email, password_hash)
            VALUES ($1, $2)
            RETURNING {MEMBER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
