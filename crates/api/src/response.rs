//! Shared response envelope types for API handlers.
//!
//! The import and contact endpoints answer with the `{ "success": ...,
//! "message": ... }` envelope the frontend has always consumed; error
//! responses mirror it via [`crate::error::AppError`].

use serde::Serialize;

/// Standard `{ "success": true, "message": ... }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
