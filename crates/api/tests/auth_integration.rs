//! Integration tests for admin and member authentication.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{
    authed_json_request, create_test_pool, create_test_app, get_request, json_request,
    parse_response_body, run_migrations, seed_admin, seed_admin_account, seed_member,
    seed_member_account, test_config,
};
use serde_json::json;
use tower::ServiceExt;

fn unique(tag: &str) -> String {
    format!("{}_{}", tag, &uuid::Uuid::new_v4().simple().to_string()[..8])
}

/// Pull a named cookie's value out of the Set-Cookie headers.
fn extract_set_cookie(response: &axum::response::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", name)))
        .map(|v| {
            v.split(';')
                .next()
                .unwrap()
                .splitn(2, '=')
                .nth(1)
                .unwrap()
                .to_string()
        })
}

fn cookie_request(method: Method, uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_admin_login_sets_refresh_cookie() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let username = unique("root");
    seed_admin_account(&pool, &username, "correct horse").await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/admin/login",
            json!({ "username": username, "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = extract_set_cookie(&response, "admin_refresh_token")
        .expect("refresh cookie set on login");
    assert!(!cookie.is_empty());

    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(raw.contains("HttpOnly"));
    assert!(raw.contains("Path=/api/admin"));

    let body = parse_response_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful!");
    assert!(body["access_token"].is_string());
    assert_eq!(body["admin"]["username"], username);
    // The hash never leaves the server.
    assert!(body["admin"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_admin_login_wrong_password_is_401() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let username = unique("root");
    seed_admin_account(&pool, &username, "correct horse").await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/admin/login",
            json!({ "username": username, "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = parse_response_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid username or password.");
}

// Unknown usernames get the same message as bad passwords.
#[tokio::test]
async fn test_admin_login_unknown_username_is_401() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/admin/login",
            json!({ "username": unique("nobody"), "password": "whatever" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Invalid username or password.");
}

#[tokio::test]
async fn test_deactivated_admin_cannot_log_in() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let username = unique("gone");
    let id = seed_admin_account(&pool, &username, "correct horse").await;
    sqlx::query("UPDATE admins SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/admin/login",
            json!({ "username": username, "password": "correct horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Account is deactivated.");
}

#[tokio::test]
async fn test_admin_refresh_rotates_cookie() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let username = unique("root");
    seed_admin_account(&pool, &username, "correct horse").await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/admin/login",
            json!({ "username": username, "password": "correct horse" }),
        ))
        .await
        .unwrap();
    let refresh_token = extract_set_cookie(&response, "admin_refresh_token").unwrap();

    let response = app
        .oneshot(cookie_request(
            Method::POST,
            "/api/admin/refresh",
            &format!("admin_refresh_token={}", refresh_token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let rotated = extract_set_cookie(&response, "admin_refresh_token")
        .expect("refresh issues a new cookie");
    assert!(!rotated.is_empty());

    let body = parse_response_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["access_token"].is_string());
}

#[tokio::test]
async fn test_admin_refresh_without_cookie_is_401() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/admin/refresh")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Access denied. No token provided.");
}

// An access token in the cookie slot must not pass the refresh check.
#[tokio::test]
async fn test_admin_refresh_rejects_access_token() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let config = test_config();
    let (_, access_token) = seed_admin(&pool, &config).await;
    let app = create_test_app(config, pool.clone());

    let response = app
        .oneshot(cookie_request(
            Method::POST,
            "/api/admin/refresh",
            &format!("admin_refresh_token={}", access_token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_logout_clears_cookie() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/admin/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cleared = extract_set_cookie(&response, "admin_refresh_token").unwrap();
    assert!(cleared.is_empty());

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Logged out successfully.");
}

#[tokio::test]
async fn test_admin_verify_and_profile() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let config = test_config();
    let (admin_id, token) = seed_admin(&pool, &config).await;
    let app = create_test_app(config, pool.clone());

    let response = app
        .clone()
        .oneshot(get_request("/api/admin/verify", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["admin"]["id"], admin_id.to_string());

    let response = app
        .clone()
        .oneshot(get_request("/api/admin/profile", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/api/admin/verify", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Access denied. No token provided.");
}

#[tokio::test]
async fn test_member_token_rejected_on_admin_route() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let config = test_config();
    let (_, _, member_token) = seed_member(&pool, &config).await;
    let app = create_test_app(config, pool.clone());

    let response = app
        .oneshot(get_request("/api/admin/verify", Some(&member_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Access denied. Admin privileges required.");
}

#[tokio::test]
async fn test_member_login_and_verify() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let email = format!("{}@club.test", unique("member"));
    seed_member_account(&pool, &email, "hunter2hunter2").await;
    let app = create_test_app(test_config(), pool.clone());

    // Login lowercases the submitted email before the lookup.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/members/login",
            json!({ "email": email.to_uppercase(), "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = extract_set_cookie(&response, "member_refresh_token")
        .expect("refresh cookie set on login");
    assert!(!cookie.is_empty());

    let body = parse_response_body(response).await;
    let access_token = body["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["member"]["email"], email);

    let response = app
        .oneshot(get_request("/api/members/verify", Some(&access_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["member"]["email"], email);
}

#[tokio::test]
async fn test_member_login_wrong_password_is_401() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let email = format!("{}@club.test", unique("member"));
    seed_member_account(&pool, &email, "hunter2hunter2").await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/members/login",
            json!({ "email": email, "password": "nope" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Invalid email or password.");
}

#[tokio::test]
async fn test_member_refresh_via_cookie() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let email = format!("{}@club.test", unique("member"));
    seed_member_account(&pool, &email, "hunter2hunter2").await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/members/login",
            json!({ "email": email, "password": "hunter2hunter2" }),
        ))
        .await
        .unwrap();
    let refresh_token = extract_set_cookie(&response, "member_refresh_token").unwrap();

    let response = app
        .oneshot(cookie_request(
            Method::POST,
            "/api/members/refresh",
            &format!("member_refresh_token={}", refresh_token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(body["access_token"].is_string());
    assert_eq!(body["member"]["email"], email);
}

#[tokio::test]
async fn test_admin_creates_and_lists_members() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let config = test_config();
    let (_, admin_token) = seed_admin(&pool, &config).await;
    let app = create_test_app(config, pool.clone());

    let email = format!("{}@club.test", unique("new"));
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/members",
            &admin_token,
            json!({ "email": email, "password": "longenough" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "Member account created successfully!");
    assert_eq!(body["member"]["email"], email);

    // Same email again conflicts.
    let response = app
        .clone()
        .oneshot(authed_json_request(
            Method::POST,
            "/api/members",
            &admin_token,
            json!({ "email": email.to_uppercase(), "password": "longenough" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = parse_response_body(response).await;
    assert_eq!(body["message"], "A member with this email already exists.");

    let response = app
        .oneshot(get_request("/api/members", Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let members = body["members"].as_array().unwrap();
    assert!(members.iter().any(|m| m["email"] == email));
}

#[tokio::test]
async fn test_member_creation_rejects_short_password() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let config = test_config();
    let (_, admin_token) = seed_admin(&pool, &config).await;
    let app = create_test_app(config, pool.clone());

    let response = app
        .oneshot(authed_json_request(
            Method::POST,
            "/api/members",
            &admin_token,
            json!({ "email": format!("{}@club.test", unique("short")), "password": "abc" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
