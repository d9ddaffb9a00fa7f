use serde::Deserialize;

/// Payload returned by the unauthenticated `/health` route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    /// Health status reported by the backend (for example "ok").
    pub status: String,
}

impl HealthResponse {
    /// Whether the backend reports itself as operational.
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok") || self.status.eq_ignore_ascii_case("healthy")
    }
}
