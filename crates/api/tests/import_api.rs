//! Integration tests for the import pipeline endpoints.
//!
//! Platform metadata endpoints are stubbed with wiremock; the rest of the
//! pipeline (extraction, dedup, embed building, persistence) runs for real
//! against the test database.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{bearer_token_for, body_json, post_json, seed_user};
use serde_json::json;
use sqlx::PgPool;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use folio_db::repositories::ProjectRepo;
use folio_sources::SourceConfig;

/// Source config whose three platform base URLs all point at the stub.
fn stub_sources(server: &MockServer) -> SourceConfig {
    SourceConfig {
        sketchfab_base_url: server.uri(),
        artstation_base_url: server.uri(),
        behance_base_url: server.uri(),
        fetch_timeout: Duration::from_secs(2),
    }
}

async fn seeded_token(pool: &PgPool) -> String {
    let user_id = seed_user(pool, "owner", "a-strong-password").await;
    bearer_token_for(user_id)
}

// ---------------------------------------------------------------------------
// Test: successful Sketchfab import
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn sketchfab_import_creates_project_with_embed(pool: PgPool) {
    let server = MockServer::start().await;
    let stub_payload = json!({
        "title": "Ancient Dragon",
        "author_name": "modeler",
        "thumbnail_url": "https://cdn.example/thumb.jpg"
    });
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stub_payload.clone()))
        .mount(&server)
        .await;

    let token = seeded_token(&pool).await;
    let app = common::build_test_app_with_sources(pool.clone(), stub_sources(&server));

    let response = post_json(
        &app,
        "/api/import/sketchfab",
        Some(token.as_str()),
        &json!({ "sourceUrl": "https://sketchfab.com/3d-models/abc123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;

    assert_eq!(body["success"], true);
    let project = &body["project"];
    assert_eq!(project["title"], "Ancient Dragon");
    assert_eq!(project["importedFrom"], "sketchfab");
    assert_eq!(project["externalId"], "abc123");
    assert_eq!(
        project["externalUrl"],
        "https://sketchfab.com/3d-models/abc123"
    );
    assert_eq!(project["category"], "3D Modeling");

    // The embed fragment exists and references the identifier.
    let embed = project["demoEmbed"].as_str().expect("demoEmbed should be set");
    assert!(embed.contains("abc123"));

    // The raw platform payload round-trips into importData untouched.
    assert_eq!(project["importData"], stub_payload);
}

// ---------------------------------------------------------------------------
// Test: re-submitting the same URL is rejected, count stays 1
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn reimporting_the_same_url_is_rejected(pool: PgPool) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Dragon" })))
        .mount(&server)
        .await;

    let token = seeded_token(&pool).await;
    let app = common::build_test_app_with_sources(pool.clone(), stub_sources(&server));
    let request = json!({ "sourceUrl": "https://sketchfab.com/3d-models/abc123" });

    let first = post_json(&app, "/api/import/sketchfab", Some(token.as_str()), &request).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(&app, "/api/import/sketchfab", Some(token.as_str()), &request).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body = body_json(second).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "DUPLICATE_IMPORT");
    assert_eq!(body["message"], "Project already imported");

    let count = ProjectRepo::count_by_import_source(&pool, "sketchfab", "abc123")
        .await
        .unwrap();
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Test: malformed URL fails before any fetch or persistence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_url_is_rejected_without_side_effects(pool: PgPool) {
    let server = MockServer::start().await;
    // No stub mounted: any request hitting the server would 404 and the
    // import would surface a fetch error instead of the extractor error.

    let token = seeded_token(&pool).await;
    let app = common::build_test_app_with_sources(pool.clone(), stub_sources(&server));

    let response = post_json(
        &app,
        "/api/import/sketchfab",
        Some(token.as_str()),
        &json!({ "sourceUrl": "https://example.com/not-a-model" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "MALFORMED_SOURCE_URL");

    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(ProjectRepo::list(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: a missing source URL is a validation error
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_source_url_is_a_validation_error(pool: PgPool) {
    let token = seeded_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/import/sketchfab",
        Some(token.as_str()),
        &json!({ "sourceUrl": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: platform failure surfaces as a fetch error, nothing persisted
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn platform_failure_surfaces_as_fetch_error(pool: PgPool) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/Xk4mPz.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let token = seeded_token(&pool).await;
    let app = common::build_test_app_with_sources(pool.clone(), stub_sources(&server));

    let response = post_json(
        &app,
        "/api/import/artstation",
        Some(token.as_str()),
        &json!({ "sourceUrl": "https://www.artstation.com/artwork/Xk4mPz" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "METADATA_FETCH_ERROR");

    assert!(ProjectRepo::list(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: a hung platform surfaces the distinct timeout kind
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn slow_platform_surfaces_fetch_timeout(pool: PgPool) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oembed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "title": "Too Slow" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let token = seeded_token(&pool).await;
    let sources = SourceConfig {
        fetch_timeout: Duration::from_millis(100),
        ..stub_sources(&server)
    };
    let app = common::build_test_app_with_sources(pool.clone(), sources);

    let response = post_json(
        &app,
        "/api/import/sketchfab",
        Some(token.as_str()),
        &json!({ "sourceUrl": "https://sketchfab.com/3d-models/abc123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "FETCH_TIMEOUT");
}

// ---------------------------------------------------------------------------
// Test: ArtStation metadata mapping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn artstation_import_maps_software_and_assets(pool: PgPool) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/Xk4mPz.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Cyber Alley",
            "description": "Environment concept",
            "software_items": [{ "name": "ZBrush" }, { "name": "Blender" }],
            "assets": [{ "image_url": "https://cdn.example/1.jpg" }]
        })))
        .mount(&server)
        .await;

    let token = seeded_token(&pool).await;
    let app = common::build_test_app_with_sources(pool.clone(), stub_sources(&server));

    let response = post_json(
        &app,
        "/api/import/artstation",
        Some(token.as_str()),
        &json!({
            "sourceUrl": "https://www.artstation.com/artwork/Xk4mPz",
            "category": "Environment Art",
            "featured": true
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let project = &body["project"];

    assert_eq!(project["importedFrom"], "artstation");
    assert_eq!(project["technologies"], json!(["ZBrush", "Blender"]));
    assert_eq!(project["images"], json!(["https://cdn.example/1.jpg"]));
    assert_eq!(project["category"], "Environment Art");
    assert_eq!(project["featured"], true);
    // Gallery platforms have no inline viewer.
    assert!(project["demoEmbed"].is_null());
}

// ---------------------------------------------------------------------------
// Test: manual import persists the payload with no external identity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn manual_import_has_no_external_identity(pool: PgPool) {
    let token = seeded_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        &app,
        "/api/import/manual",
        Some(token.as_str()),
        &json!({
            "projectData": {
                "title": "X",
                "description": "Y",
                "category": "Z"
            }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let project = &body["project"];

    assert_eq!(project["importedFrom"], "manual");
    assert!(project["externalId"].is_null());
    assert_eq!(project["title"], "X");

    // Manual imports may be repeated freely.
    let again = post_json(
        &app,
        "/api/import/manual",
        Some(token.as_str()),
        &json!({
            "projectData": { "title": "X", "description": "Y", "category": "Z" }
        }),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Test: manual import validates required fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn manual_import_rejects_empty_required_fields(pool: PgPool) {
    let token = seeded_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/import/manual",
        Some(token.as_str()),
        &json!({
            "projectData": { "title": "", "description": "Y", "category": "Z" }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: import endpoints require authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn import_requires_bearer_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/import/sketchfab",
        None,
        &json!({ "sourceUrl": "https://sketchfab.com/3d-models/abc123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
