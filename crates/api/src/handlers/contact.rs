//! Handler for the contact-form relay.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use folio_core::error::CoreError;
use folio_mailer::ContactMessage;

use crate::error::{AppError, AppResult};
use crate::response::ApiMessage;
use crate::state::AppState;

/// Request body for `POST /contact`.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /api/contact
///
/// Relay a contact-form submission: one notification to the portfolio owner
/// and one confirmation back to the sender. Validation happens before any
/// SMTP traffic.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<Json<ApiMessage>> {
    if input.name.trim().is_empty()
        || input.email.trim().is_empty()
        || input.message.trim().is_empty()
    {
        return Err(AppError::Core(CoreError::Validation(
            "All fields are required".into(),
        )));
    }

    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| AppError::InternalError("Contact relay is not configured".into()))?;

    mailer
        .relay_contact(&ContactMessage {
            name: input.name,
            email: input.email,
            message: input.message,
        })
        .await?;

    Ok(Json(ApiMessage::ok(
        "Message sent successfully! You will receive a confirmation email shortly.",
    )))
}
