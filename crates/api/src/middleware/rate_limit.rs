//! Per-IP rate limiting for the login routes.

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovRateLimiter,
};
use std::{
    collections::HashMap,
    net::{IpAddr, SocketAddr},
    num::NonZeroU32,
    sync::{Arc, RwLock},
};

use crate::app::AppState;
use crate::error::ApiError;

type IpLimiter = GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// One governor limiter per client IP, created lazily.
pub struct LoginRateLimiter {
    limiters: RwLock<HashMap<IpAddr, Arc<IpLimiter>>>,
    per_minute: u32,
}

impl LoginRateLimiter {
    pub fn new(per_minute: u32) -> Self {
        Self {
            limiters: RwLock::new(HashMap::new()),
            per_minute,
        }
    }

    fn get_or_create(&self, ip: IpAddr) -> Arc<IpLimiter> {
        {
            let limiters = self.limiters.read().unwrap();
            if let Some(limiter) = limiters.get(&ip) {
                return limiter.clone();
            }
        }

        let mut limiters = self.limiters.write().unwrap();
        if let Some(limiter) = limiters.get(&ip) {
            return limiter.clone();
        }

        let quota = Quota::per_minute(
            NonZeroU32::new(self.per_minute).unwrap_or(NonZeroU32::new(10).unwrap()),
        );
        let limiter = Arc::new(GovRateLimiter::direct(quota));
        limiters.insert(ip, limiter.clone());
        limiter
    }

    /// Returns false when the IP has exhausted its quota.
    pub fn check(&self, ip: IpAddr) -> bool {
        self.get_or_create(ip).check().is_ok()
    }
}

impl std::fmt::Debug for LoginRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRateLimiter")
            .field("per_minute", &self.per_minute)
            .field("active_ips", &self.limiters.read().unwrap().len())
            .finish()
    }
}

/// Resolves the client IP from `X-Forwarded-For` (first hop) or the
/// connection address.
fn client_ip(req: &Request<Body>) -> Option<IpAddr> {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(ip) = forwarded
            .split(',')
            .next()
            .and_then(|s| s.trim().parse().ok())
        {
            return Some(ip);
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}

/// Middleware applied to the login routes only.
pub async fn login_rate_limit(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref limiter) = state.login_limiter {
        if let Some(ip) = client_ip(&req) {
            if !limiter.check(ip) {
                return ApiError::RateLimited.into_response();
            }
        }
    }

    next.run(req).await
}
