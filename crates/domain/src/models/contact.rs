//! Contact-form intake: membership and volunteer applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A submitted membership application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MembershipApplication {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub year: String,
    pub interests: Vec<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A submitted volunteer application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VolunteerApplication {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub year: String,
    pub interest_area: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateMembershipRequest {
    #[validate(length(min = 1, message = "Name, email and year are required"))]
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Name, email and year are required"))]
    pub year: String,

    #[validate(length(min = 1, message = "Please select at least one interest"))]
    pub interests: Vec<String>,

    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateVolunteerRequest {
    #[validate(length(min = 1, message = "Name, email, year and interest area are required"))]
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Name, email, year and interest area are required"))]
    pub year: String,

    #[validate(length(min = 1, message = "Name, email, year and interest area are required"))]
    pub interest_area: String,

    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MembershipCreatedResponse {
    pub success: bool,
    pub message: String,
    pub membership: MembershipApplication,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VolunteerCreatedResponse {
    pub success: bool,
    pub message: String,
    pub volunteer: VolunteerApplication,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MembershipListResponse {
    pub success: bool,
    pub count: usize,
    pub memberships: Vec<MembershipApplication>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct VolunteerListResponse {
    pub success: bool,
    pub count: usize,
    pub volunteers: Vec<VolunteerApplication>,
}
