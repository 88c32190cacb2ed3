//! Member account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_password;

/// A member account, safe for API exposure (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Member {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Member login request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct MemberLoginRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Admin-initiated member account creation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateMemberRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

/// Successful login: access token in the body, refresh token in a cookie.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberLoginResponse {
    pub success: bool,
    pub message: String,
    pub access_token: String,
    pub member: Member,
}

/// Successful refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberRefreshResponse {
    pub success: bool,
    pub access_token: String,
    pub member: Member,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberResponse {
    pub success: bool,
    pub member: Member,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MemberListResponse {
    pub success: bool,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateMemberResponse {
    pub success: bool,
    pub message: String,
    pub member: Member,
}
