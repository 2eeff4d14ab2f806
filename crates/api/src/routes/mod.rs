pub mod auth;
pub mod contact;
pub mod health;
pub mod import;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login            login (public)
/// /auth/refresh          refresh (public)
/// /auth/logout           logout (requires auth)
///
/// /projects              list (public), create (requires auth)
/// /projects/{id}         get (public), update, delete (require auth)
///
/// /contact               relay a contact-form submission (public)
///
/// /import/sketchfab      import a Sketchfab model URL (requires auth)
/// /import/artstation     import an ArtStation artwork URL (requires auth)
/// /import/behance        import a Behance gallery URL (requires auth)
/// /import/manual         persist a caller-supplied payload (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout).
        .nest("/auth", auth::router())
        // Project CRUD.
        .nest("/projects", project::router())
        // Contact-form relay.
        .nest("/contact", contact::router())
        // Import pipeline (one endpoint per platform plus manual).
        .nest("/import", import::router())
}
