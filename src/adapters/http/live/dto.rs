//! HTTP DTOs for live update endpoints.

use serde::Serialize;

pub use crate::application::ClientSettings;
use crate::domain::broadcast::OperatorNotice;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Operator notices drained for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct NoticesResponse {
    pub notices: Vec<OperatorNotice>,
}

/// Connection status for the admin surface.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub state: String,
    pub connected: bool,
}
