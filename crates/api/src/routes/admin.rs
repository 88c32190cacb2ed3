//! Admin authentication handlers.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use validator::Validate;

use domain::models::admin::{
    Admin, AdminLoginRequest, AdminLoginResponse, AdminRefreshResponse, AdminResponse,
    MessageResponse,
};
use persistence::repositories::AdminRepository;
use shared::jwt::{subject_id, TokenRole};
use shared::password::verify_password;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;
use crate::services::cookies::ADMIN_REFRESH_COOKIE;

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid username or password.".into())
}

/// `POST /api/admin/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<AdminLoginRequest>,
) -> Result<(HeaderMap, Json<AdminLoginResponse>), ApiError> {
    body.validate()?;

    let entity = AdminRepository::new(state.pool.clone())
        .find_by_username(&body.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&body.password, &entity.password_hash)? {
        return Err(invalid_credentials());
    }
    if !entity.is_active {
        return Err(ApiError::Forbidden("Account is deactivated.".into()));
    }

    let email = entity.email.clone().unwrap_or_default();
    let (access_token, _) =
        state
            .jwt
            .generate_access_token(entity.id, &email, TokenRole::Admin)?;
    let (refresh_token, _) =
        state
            .jwt
            .generate_refresh_token(entity.id, &email, TokenRole::Admin)?;

    let mut headers = HeaderMap::new();
    state.cookies.set_admin_refresh(&mut headers, &refresh_token);

    Ok((
        headers,
        Json(AdminLoginResponse {
            success: true,
            message: "Login successful!".to_string(),
            access_token,
            admin: entity.into_domain(),
        }),
    ))
}

/// `POST /api/admin/refresh`
///
/// The refresh token only ever arrives in the httpOnly cookie. Rotation:
/// every refresh issues a new refresh token alongside the access token.
pub async fn refresh(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> Result<(HeaderMap, Json<AdminRefreshResponse>), ApiError> {
    let token = state
        .cookies
        .extract_cookie(&request_headers, ADMIN_REFRESH_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("Access denied. No token provided.".into()))?;

    let claims = state.jwt.validate_refresh_token(token)?;
    if claims.role != TokenRole::Admin {
        return Err(ApiError::Unauthorized("Invalid or expired token.".into()));
    }

    let admin_id = subject_id(&claims)?;
    let entity = AdminRepository::new(state.pool.clone())
        .find_by_id(admin_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token.".into()))?;
    if !entity.is_active {
        return Err(ApiError::Forbidden("Account is deactivated.".into()));
    }

    let email = entity.email.clone().unwrap_or_default();
    let (access_token, _) =
        state
            .jwt
            .generate_access_token(entity.id, &email, TokenRole::Admin)?;
    let (refresh_token, _) =
        state
            .jwt
            .generate_refresh_token(entity.id, &email, TokenRole::Admin)?;

    let mut headers = HeaderMap::new();
    state.cookies.set_admin_refresh(&mut headers, &refresh_token);

    Ok((
        headers,
        Json(AdminRefreshResponse {
            success: true,
            access_token,
            admin: entity.into_domain(),
        }),
    ))
}

/// `POST /api/admin/logout`
pub async fn logout(
    State(state): State<AppState>,
) -> (StatusCode, HeaderMap, Json<MessageResponse>) {
    let mut headers = HeaderMap::new();
    state.cookies.clear_admin_refresh(&mut headers);

    (
        StatusCode::OK,
        headers,
        Json(MessageResponse {
            success: true,
            message: "Logged out successfully.".to_string(),
        }),
    )
}

async fn load_admin(state: &AppState, auth: &AdminAuth) -> Result<Admin, ApiError> {
    AdminRepository::new(state.pool.clone())
        .find_by_id(auth.admin_id)
        .await?
        .map(|entity| entity.into_domain())
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token.".into()))
}

/// `GET /api/admin/verify`
pub async fn verify(
    State(state): State<AppState>,
    auth: AdminAuth,
) -> Result<Json<AdminResponse>, ApiError> {
    let admin = load_admin(&state, &auth).await?;
    Ok(Json(AdminResponse {
        success: true,
        admin,
    }))
}

/// `GET /api/admin/profile`
pub async fn profile(
    State(state): State<AppState>,
    auth: AdminAuth,
) -> Result<Json<AdminResponse>, ApiError> {
    let admin = load_admin(&state, &auth).await?;
    Ok(Json(AdminResponse {
        success: true,
        admin,
    }))
}
