use folio_core::platform::Platform;

/// A metadata fetch failed. Carries the platform and identifier so the
/// orchestrator can report which source was unreachable.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request exceeded the configured deadline.
    #[error("{platform} metadata request for '{external_id}' timed out")]
    Timeout {
        platform: Platform,
        external_id: String,
    },

    /// The platform answered with a non-2xx status.
    #[error("{platform} returned HTTP {status} for '{external_id}'")]
    Status {
        platform: Platform,
        external_id: String,
        status: u16,
    },

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("{platform} request for '{external_id}' failed: {source}")]
    Request {
        platform: Platform,
        external_id: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the JSON shape the platform documents.
    #[error("{platform} returned a malformed body for '{external_id}': {reason}")]
    Malformed {
        platform: Platform,
        external_id: String,
        reason: String,
    },
}

impl FetchError {
    /// Whether the failure was the deadline rather than the platform.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
