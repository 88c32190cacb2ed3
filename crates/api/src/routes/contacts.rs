//! Membership and volunteer application handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain::models::admin::MessageResponse;
use domain::models::contact::{
    CreateMembershipRequest, CreateVolunteerRequest, MembershipCreatedResponse,
    MembershipListResponse, VolunteerCreatedResponse, VolunteerListResponse,
};
use persistence::repositories::ContactRepository;
use shared::validation::normalize_email;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;

fn application_not_found() -> ApiError {
    ApiError::NotFound("Application not found.".into())
}

/// `POST /api/contacts/membership`
pub async fn submit_membership(
    State(state): State<AppState>,
    Json(mut body): Json<CreateMembershipRequest>,
) -> Result<(StatusCode, Json<MembershipCreatedResponse>), ApiError> {
    body.validate()?;
    body.email = normalize_email(&body.email);

    let entity = ContactRepository::new(state.pool.clone())
        .create_membership(&body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MembershipCreatedResponse {
            success: true,
            message: "Application submitted successfully!".to_string(),
            membership: entity.into(),
        }),
    ))
}

/// `GET /api/contacts/membership` (admin)
pub async fn list_memberships(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> Result<Json<MembershipListResponse>, ApiError> {
    let memberships: Vec<_> = ContactRepository::new(state.pool.clone())
        .list_memberships()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(MembershipListResponse {
        success: true,
        count: memberships.len(),
        memberships,
    }))
}

/// `DELETE /api/contacts/membership/:id` (admin)
pub async fn delete_membership(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = ContactRepository::new(state.pool.clone())
        .delete_membership(id)
        .await?;
    if deleted == 0 {
        return Err(application_not_found());
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Application deleted successfully.".to_string(),
    }))
}

/// `POST /api/contacts/volunteer`
pub async fn submit_volunteer(
    State(state): State<AppState>,
    Json(mut body): Json<CreateVolunteerRequest>,
) -> Result<(StatusCode, Json<VolunteerCreatedResponse>), ApiError> {
    body.validate()?;
    body.email = normalize_email(&body.email);

    let entity = ContactRepository::new(state.pool.clone())
        .create_volunteer(&body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(VolunteerCreatedResponse {
            success: true,
            message: "Application submitted successfully!".to_string(),
            volunteer: entity.into(),
        }),
    ))
}

/// `GET /api/contacts/volunteer` (admin)
pub async fn list_volunteers(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> Result<Json<VolunteerListResponse>, ApiError> {
    let volunteers: Vec<_> = ContactRepository::new(state.pool.clone())
        .list_volunteers()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(VolunteerListResponse {
        success: true,
        count: volunteers.len(),
        volunteers,
    }))
}

/// `DELETE /api/contacts/volunteer/:id` (admin)
pub async fn delete_volunteer(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = ContactRepository::new(state.pool.clone())
        .delete_volunteer(id)
        .await?;
    if deleted == 0 {
        return Err(application_not_found());
    }

    Ok(Json(MessageResponse {
        success: true,
        message: "Application deleted successfully.".to_string(),
    }))
}
