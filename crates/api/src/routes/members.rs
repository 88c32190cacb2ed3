//! Member authentication and account-management handlers.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use validator::Validate;

use domain::models::member::{
    CreateMemberRequest, CreateMemberResponse, Member, MemberListResponse, MemberLoginRequest,
    MemberLoginResponse, MemberRefreshResponse, MemberResponse,
};
use domain::models::admin::MessageResponse;
use persistence::db::is_unique_violation;
use persistence::repositories::MemberRepository;
use shared::jwt::{subject_id, TokenRole};
use shared::password::{hash_password, verify_password};
use shared::validation::normalize_email;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminAuth, MemberAuth};
use crate::services::cookies::MEMBER_REFRESH_COOKIE;

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid email or password.".into())
}

/// `POST /api/members/login`
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<MemberLoginRequest>,
) -> Result<(HeaderMap, Json<MemberLoginResponse>), ApiError> {
    body.validate()?;

    let email = normalize_email(&body.email);
    let entity = MemberRepository::new(state.pool.clone())
        .find_by_email(&email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&body.password, &entity.password_hash)? {
        return Err(invalid_credentials());
    }
    if !entity.is_active {
        return Err(ApiError::Forbidden("Account is deactivated.".into()));
    }

    let (access_token, _) =
        state
            .jwt
            .generate_access_token(entity.id, &entity.email, TokenRole::Member)?;
    let (refresh_token, _) =
        state
            .jwt
            .generate_refresh_token(entity.id, &entity.email, TokenRole::Member)?;

    let mut headers = HeaderMap::new();
    state
        .cookies
        .set_member_refresh(&mut headers, &refresh_token);

    Ok((
        headers,
        Json(MemberLoginResponse {
            success: true,
            message: "Login successful!".to_string(),
            access_token,
            member: entity.into_domain(),
        }),
    ))
}

/// `POST /api/members/refresh`
pub async fn refresh(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> Result<(HeaderMap, Json<MemberRefreshResponse>), ApiError> {
    let token = state
        .cookies
        .extract_cookie(&request_headers, MEMBER_REFRESH_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("Access denied. No token provided.".into()))?;

    let claims = state.jwt.validate_refresh_token(token)?;
    if claims.role != TokenRole::Member {
        return Err(ApiError::Unauthorized("Invalid or expired token.".into()));
    }

    let member_id = subject_id(&claims)?;
    let entity = MemberRepository::new(state.pool.clone())
        .find_by_id(member_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token.".into()))?;
    if !entity.is_active {
        return Err(ApiError::Forbidden("Account is deactivated.".into()));
    }

    let (access_token, _) =
        state
            .jwt
            .generate_access_token(entity.id, &entity.email, TokenRole::Member)?;
    let (refresh_token, _) =
        state
            .jwt
            .generate_refresh_token(entity.id, &entity.email, TokenRole::Member)?;

    let mut headers = HeaderMap::new();
    state
        .cookies
        .set_member_refresh(&mut headers, &refresh_token);

    Ok((
        headers,
        Json(MemberRefreshResponse {
            success: true,
            access_token,
            member: entity.into_domain(),
        }),
    ))
}

/// `POST /api/members/logout`
pub async fn logout(
    State(state): State<AppState>,
) -> (StatusCode, HeaderMap, Json<MessageResponse>) {
    let mut headers = HeaderMap::new();
    state.cookies.clear_member_refresh(&mut headers);

    (
        StatusCode::OK,
        headers,
        Json(MessageResponse {
            success: true,
            message: "Logged out successfully.".to_string(),
        }),
    )
}

/// `GET /api/members/verify`
pub async fn verify(
    State(state): State<AppState>,
    auth: MemberAuth,
) -> Result<Json<MemberResponse>, ApiError> {
    let member: Member = MemberRepository::new(state.pool.clone())
        .find_by_id(auth.member_id)
        .await?
        .map(|entity| entity.into_domain())
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired token.".into()))?;

    Ok(Json(MemberResponse {
        success: true,
        member,
    }))
}

/// `GET /api/members` (admin)
pub async fn list_members(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> Result<Json<MemberListResponse>, ApiError> {
    let members = MemberRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(|entity| entity.into_domain())
        .collect();

    Ok(Json(MemberListResponse {
        success: true,
        members,
    }))
}

/// `POST /api/members` (admin)
pub async fn create_member(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Json(body): Json<CreateMemberRequest>,
) -> Result<(StatusCode, Json<CreateMemberResponse>), ApiError> {
    body.validate()?;

    let email = normalize_email(&body.email);
    let password_hash = hash_password(&body.password)?;

    let entity = MemberRepository::new(state.pool.clone())
        .create(&email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("A member with this email already exists.".into())
            } else {
                e.into()
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateMemberResponse {
            success: true,
            message: "Member account created successfully!".to_string(),
            member: entity.into_domain(),
        }),
    ))
}
