//! Event registration handlers.
//!
//! The decision logic lives in `domain::models::registration`; these
//! handlers do the I/O around it: load the event, resolve the caller's
//! identity, run the gates, and insert under the partial unique indexes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use domain::models::registration::{
    can_register, check_anti_spam, RegisterRequest, RegisterResponse, Registrant,
    RegistrationKind, RegistrationListResponse, RegistrationReceipt, RegistrationStatusResponse,
    RegistrationSummary,
};
use persistence::db::is_unique_violation;
use persistence::entities::EventEntity;
use persistence::repositories::{EventRepository, RegistrationRepository};
use shared::validation::normalize_email;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminAuth, OptionalMemberAuth};

const ALREADY_REGISTERED: &str = "You are already registered for this event.";

fn duplicate() -> ApiError {
    ApiError::Conflict(ALREADY_REGISTERED.into())
}

async fn load_event(state: &AppState, event_id: Uuid) -> Result<EventEntity, ApiError> {
    EventRepository::new(state.pool.clone())
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found.".into()))
}

/// Trimmed, lowercased body email; empty collapses to None.
fn body_email(email: Option<&str>) -> Option<String> {
    email
        .map(normalize_email)
        .filter(|e| !e.is_empty())
}

/// `POST /api/events/:event_id/register`
pub async fn register(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    OptionalMemberAuth(auth): OptionalMemberAuth,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let event = load_event(&state, event_id).await?;

    let email = body_email(body.email.as_deref());

    // Members skip the anti-spam gate; a member's stored email is the
    // body email when given, otherwise the account email.
    let registrant = match auth {
        Some(member) => Registrant::Member {
            user_id: member.member_id,
            email: email.unwrap_or(member.email),
        },
        None => {
            check_anti_spam(body.website.as_deref(), body.confirm_word.as_deref())
                .map_err(|e| ApiError::Validation(e.to_string()))?;
            Registrant::Guest { email }
        }
    };

    can_register(&event.schedule(), Utc::now(), &registrant)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let repo = RegistrationRepository::new(state.pool.clone());

    // Advisory pre-check; the partial unique indexes are the authority.
    let existing = match &registrant {
        Registrant::Member { user_id, .. } => {
            repo.find_by_event_and_user(event_id, *user_id).await?
        }
        Registrant::Guest { email: Some(email) } => {
            repo.find_by_event_and_email(event_id, email).await?
        }
        Registrant::Guest { email: None } => None,
    };
    if existing.is_some() {
        return Err(duplicate());
    }

    let name = body
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let row = repo
        .insert(
            event_id,
            registrant.user_id(),
            registrant.email(),
            name,
            Utc::now(),
        )
        .await
        .map_err(|e| {
            // Lost the race between pre-check and insert: same 409.
            if is_unique_violation(&e) {
                duplicate()
            } else {
                e.into()
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Successfully registered for the event!".to_string(),
            registration: RegistrationReceipt {
                id: row.id,
                event_id: row.event_id,
                registration_timestamp: row.registration_timestamp,
            },
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub email: Option<String>,
}

/// `GET /api/events/:event_id/register/status`
pub async fn registration_status(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    OptionalMemberAuth(auth): OptionalMemberAuth,
    Query(query): Query<StatusQuery>,
) -> Result<Json<RegistrationStatusResponse>, ApiError> {
    load_event(&state, event_id).await?;

    let repo = RegistrationRepository::new(state.pool.clone());

    let registered = if let Some(member) = auth {
        repo.find_by_event_and_user(event_id, member.member_id)
            .await?
            .is_some()
    } else if let Some(email) = body_email(query.email.as_deref()) {
        repo.find_by_event_and_email(event_id, &email)
            .await?
            .is_some()
    } else {
        false
    };

    Ok(Json(RegistrationStatusResponse {
        success: true,
        registered,
    }))
}

/// `GET /api/events/:event_id/registrations` (admin)
pub async fn list_registrations(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<RegistrationListResponse>, ApiError> {
    load_event(&state, event_id).await?;

    let rows = RegistrationRepository::new(state.pool.clone())
        .list_for_event(event_id)
        .await?;

    let registrations: Vec<RegistrationSummary> = rows
        .into_iter()
        .map(|row| {
            let kind = if row.user_id.is_some() {
                RegistrationKind::Member
            } else {
                RegistrationKind::Guest
            };
            RegistrationSummary {
                id: row.id,
                name: row.name.unwrap_or_else(|| "—".to_string()),
                // Member rows show the account email; guests their own.
                email: row
                    .member_email
                    .or(row.email)
                    .unwrap_or_else(|| "—".to_string()),
                kind,
                registration_timestamp: row.registration_timestamp,
            }
        })
        .collect();

    Ok(Json(RegistrationListResponse {
        success: true,
        count: registrations.len(),
        registrations,
    }))
}
