//! Shared helpers for API integration tests.
//!
//! Builds the real application router (same middleware stack as the binary)
//! on top of a test database pool, with the platform base URLs optionally
//! pointed at a stub server.

#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use folio_api::auth::jwt::{generate_access_token, JwtConfig};
use folio_api::auth::password::hash_password;
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::types::DbId;
use folio_db::models::user::CreateUser;
use folio_db::repositories::UserRepo;
use folio_sources::{SourceClient, SourceConfig};

/// JWT config with a fixed secret so tests can mint their own tokens.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 15,
        refresh_token_expiry_days: 7,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
        admin_username: "admin".to_string(),
        admin_password: None,
    }
}

/// Build the application router with default (real) platform base URLs.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_sources(pool, SourceConfig::default())
}

/// Build the application router with the given source configuration, so
/// import tests can point the metadata client at a stub server.
pub fn build_test_app_with_sources(pool: PgPool, sources_config: SourceConfig) -> Router {
    let config = test_config();
    let sources =
        Arc::new(SourceClient::new(sources_config).expect("test metadata client should build"));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sources,
        mailer: None,
    };

    build_app_router(state, &config)
}

/// Insert a user with the given credentials, returning its id.
pub async fn seed_user(pool: &PgPool, username: &str, password: &str) -> DbId {
    let password_hash = hash_password(password).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    .expect("user insert should succeed");
    user.id
}

/// Mint a bearer token accepted by the test router's auth extractor.
pub fn bearer_token_for(user_id: DbId) -> String {
    let token = generate_access_token(user_id, &test_jwt_config())
        .expect("token generation should succeed");
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Issue a GET request against the app.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Issue a JSON POST request, optionally with an `Authorization` header.
pub async fn post_json(
    app: &Router,
    uri: &str,
    auth: Option<&str>,
    body: &serde_json::Value,
) -> Response<Body> {
    send_json(app, "POST", uri, auth, body).await
}

/// Issue a JSON PUT request, optionally with an `Authorization` header.
pub async fn put_json(
    app: &Router,
    uri: &str,
    auth: Option<&str>,
    body: &serde_json::Value,
) -> Response<Body> {
    send_json(app, "PUT", uri, auth, body).await
}

/// Issue a DELETE request, optionally with an `Authorization` header.
pub async fn delete(app: &Router, uri: &str, auth: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = builder.body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: &serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
