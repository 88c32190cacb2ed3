use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use shared::jwt::JwtKeys;

use crate::config::Config;
use crate::middleware::rate_limit::{login_rate_limit, LoginRateLimiter};
use crate::routes::{admin, contacts, events, health, members, registrations};
use crate::services::cookies::CookieHelper;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtKeys>,
    pub cookies: CookieHelper,
    pub login_limiter: Option<Arc<LoginRateLimiter>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let jwt = Arc::new(JwtKeys::with_leeway(
        &config.jwt.secret,
        config.jwt.access_token_expiry_secs,
        config.jwt.refresh_token_expiry_secs,
        config.jwt.leeway_secs,
    ));

    let cookies = CookieHelper::new(
        config.cookie.clone(),
        config.jwt.refresh_token_expiry_secs,
    );

    // 0 disables the limiter (tests)
    let login_limiter = if config.security.login_rate_limit_per_minute > 0 {
        Some(Arc::new(LoginRateLimiter::new(
            config.security.login_rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        cookies,
        login_limiter,
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_credentials(false)
    };

    // Login routes get a per-IP rate limit on top of everything else
    let login_routes = Router::new()
        .route("/api/admin/login", post(admin::login))
        .route("/api/members/login", post(members::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    let admin_routes = Router::new()
        .route("/api/admin/refresh", post(admin::refresh))
        .route("/api/admin/logout", post(admin::logout))
        .route("/api/admin/verify", get(admin::verify))
        .route("/api/admin/profile", get(admin::profile));

    let member_routes = Router::new()
        .route("/api/members/refresh", post(members::refresh))
        .route("/api/members/logout", post(members::logout))
        .route("/api/members/verify", get(members::verify))
        // Admin-only account management
        .route(
            "/api/members",
            get(members::list_members).post(members::create_member),
        );

    // Static segments before :event_id so the router never shadows them
    let event_routes = Router::new()
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route("/api/events/upcoming", get(events::list_upcoming))
        .route("/api/events/past", get(events::list_past))
        .route("/api/events/gallery", get(events::gallery))
        .route(
            "/api/events/:event_id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/api/events/:event_id/media", patch(events::add_media))
        .route(
            "/api/events/:event_id/media/:public_id",
            delete(events::delete_media),
        );

    let registration_routes = Router::new()
        .route(
            "/api/events/:event_id/register",
            post(registrations::register),
        )
        .route(
            "/api/events/:event_id/register/status",
            get(registrations::registration_status),
        )
        .route(
            "/api/events/:event_id/registrations",
            get(registrations::list_registrations),
        );

    let contact_routes = Router::new()
        .route(
            "/api/contacts/membership",
            post(contacts::submit_membership).get(contacts::list_memberships),
        )
        .route(
            "/api/contacts/membership/:id",
            delete(contacts::delete_membership),
        )
        .route(
            "/api/contacts/volunteer",
            post(contacts::submit_volunteer).get(contacts::list_volunteers),
        )
        .route(
            "/api/contacts/volunteer/:id",
            delete(contacts::delete_volunteer),
        );

    let health_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready));

    Router::new()
        .merge(health_routes)
        .merge(login_routes)
        .merge(admin_routes)
        .merge(member_routes)
        .merge(event_routes)
        .merge(registration_routes)
        .merge(contact_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
