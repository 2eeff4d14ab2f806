//! Route definitions for the `/import` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::import;
use crate::state::AppState;

/// Routes mounted at `/import`. All require authentication.
///
/// ```text
/// POST /sketchfab   -> import_sketchfab
/// POST /artstation  -> import_artstation
/// POST /behance     -> import_behance
/// POST /manual      -> import_manual
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sketchfab", post(import::import_sketchfab))
        .route("/artstation", post(import::import_artstation))
        .route("/behance", post(import::import_behance))
        .route("/manual", post(import::import_manual))
}
