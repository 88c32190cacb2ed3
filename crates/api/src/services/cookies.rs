//! httpOnly refresh-token cookies.
//!
//! Access tokens travel in response bodies; refresh tokens only ever live
//! in httpOnly cookies scoped to their own refresh path, one cookie per
//! surface (admin portal, member area).

use axum::http::{header::SET_COOKIE, HeaderMap, HeaderValue};

use crate::config::CookieConfig;

pub const ADMIN_REFRESH_COOKIE: &str = "admin_refresh_token";
pub const MEMBER_REFRESH_COOKIE: &str = "member_refresh_token";

const ADMIN_REFRESH_PATH: &str = "/api/admin";
const MEMBER_REFRESH_PATH: &str = "/api/members";

/// Cookie helper for the two refresh-token cookies.
#[derive(Debug, Clone)]
pub struct CookieHelper {
    config: CookieConfig,
    refresh_token_expiry_secs: i64,
}

impl CookieHelper {
    pub fn new(config: CookieConfig, refresh_token_expiry_secs: i64) -> Self {
        Self {
            config,
            refresh_token_expiry_secs,
        }
    }

    /// Set the admin refresh cookie on a response.
    pub fn set_admin_refresh(&self, headers: &mut HeaderMap, token: &str) {
        self.append(
            headers,
            self.build_cookie(ADMIN_REFRESH_COOKIE, token, ADMIN_REFRESH_PATH),
        );
    }

    /// Set the member refresh cookie on a response.
    pub fn set_member_refresh(&self, headers: &mut HeaderMap, token: &str) {
        self.append(
            headers,
            self.build_cookie(MEMBER_REFRESH_COOKIE, token, MEMBER_REFRESH_PATH),
        );
    }

    /// Clear the admin refresh cookie (logout).
    pub fn clear_admin_refresh(&self, headers: &mut HeaderMap) {
        self.append(
            headers,
            self.build_clear_cookie(ADMIN_REFRESH_COOKIE, ADMIN_REFRESH_PATH),
        );
    }

    /// Clear the member refresh cookie (logout).
    pub fn clear_member_refresh(&self, headers: &mut HeaderMap) {
        self.append(
            headers,
            self.build_clear_cookie(MEMBER_REFRESH_COOKIE, MEMBER_REFRESH_PATH),
        );
    }

    /// Extract a cookie value from request headers by name.
    pub fn extract_cookie<'a>(&self, headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers
            .get(axum::http::header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|cookie_header| {
                cookie_header
                    .split(';')
                    .map(|s| s.trim())
                    .find_map(|cookie| {
                        let (cookie_name, cookie_value) = cookie.split_once('=')?;
                        (cookie_name == name).then_some(cookie_value)
                    })
            })
    }

    fn append(&self, headers: &mut HeaderMap, cookie: String) {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            headers.append(SET_COOKIE, value);
        }
    }

    fn build_cookie(&self, name: &str, value: &str, path: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path={}; Max-Age={}; HttpOnly",
            name, value, path, self.refresh_token_expiry_secs
        );
        self.push_attributes(&mut cookie);
        cookie
    }

    fn build_clear_cookie(&self, name: &str, path: &str) -> String {
        let mut cookie = format!(
            "{}=; Path={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly",
            name, path
        );
        self.push_attributes(&mut cookie);
        cookie
    }

    fn push_attributes(&self, cookie: &mut String) {
        if self.config.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.config.same_site));
        if !self.config.domain.is_empty() {
            cookie.push_str(&format!("; Domain={}", self.config.domain));
        }
    }
}
