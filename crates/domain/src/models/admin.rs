//! Admin account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An admin account, safe for API exposure (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin login request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "Username and password are required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Username and password are required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminLoginResponse {
    pub success: bool,
    pub message: String,
    pub access_token: String,
    pub admin: Admin,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminRefreshResponse {
    pub success: bool,
    pub access_token: String,
    pub admin: Admin,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminResponse {
    pub success: bool,
    pub admin: Admin,
}

/// Generic `{success, message}` body for logout and deletes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
