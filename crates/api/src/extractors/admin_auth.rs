//! Admin JWT authentication extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use persistence::repositories::AdminRepository;
use shared::jwt::{subject_id, TokenRole};

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated admin resolved from a Bearer access token.
///
/// Validates the token, requires the admin role, and confirms the
/// account still exists and is active.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub admin_id: Uuid,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::Unauthorized("Access denied. No token provided.".into()))?;

        let claims = state
            .jwt
            .validate_access_token(token)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token.".into()))?;

        if claims.role != TokenRole::Admin {
            return Err(ApiError::Forbidden(
                "Access denied. Admin privileges required.".into(),
            ));
        }

        let admin_id =
            subject_id(&claims).map_err(|_| ApiError::Unauthorized("Invalid or expired token.".into()))?;

        let admin = AdminRepository::new(state.pool.clone())
            .find_by_id(admin_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token.".into()))?;

        if !admin.is_active {
            return Err(ApiError::Forbidden("Account is deactivated.".into()));
        }

        Ok(AdminAuth {
            admin_id,
            username: admin.username,
        })
    }
}

/// Pulls the token out of an `Authorization: Bearer` header.
pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}
