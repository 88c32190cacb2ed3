//! Member JWT authentication extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use persistence::repositories::MemberRepository;
use shared::jwt::{subject_id, TokenRole};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::admin_auth::bearer_token;

/// Authenticated member resolved from a Bearer access token.
///
/// Carries the account email so registration handlers can fall back to
/// it when no body email is supplied.
#[derive(Debug, Clone)]
pub struct MemberAuth {
    pub member_id: Uuid,
    pub email: String,
}

async fn resolve_member(state: &AppState, token: &str) -> Result<MemberAuth, ApiError> {
    let claims = state
        .jwt
        .validate_access_token(token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token.".into()))?;

    if claims.role != TokenRole::Member {
        return Err(ApiError::Forbidden(
            "Access denied. Member account required.".into(),
        ));
    }

    let member_id =
        subject_id(&claims).map_err(|_| ApiError::Unauthorized("Invalid or expired token.".into()))?;

    let member = MemberRepository::new(state.pool.clone())
        .find_by_id(member_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token.".into()))?;

    if !member.is_active {
        return Err(ApiError::Forbidden("Account is deactivated.".into()));
    }

    Ok(MemberAuth {
        member_id,
        email: member.email,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for MemberAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("Access denied. No token provided.".into()))?;

        resolve_member(state, token).await
    }
}

/// Optional member authentication.
///
/// Yields `None` for missing, invalid, or non-member tokens instead of
/// rejecting; absent identity is not an error on mixed public/member
/// routes like event registration.
#[derive(Debug, Clone)]
pub struct OptionalMemberAuth(pub Option<MemberAuth>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalMemberAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(OptionalMemberAuth(None));
        };

        Ok(OptionalMemberAuth(resolve_member(state, token).await.ok()))
    }
}
