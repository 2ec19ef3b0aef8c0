//! HTTP routes for live update endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{drain_notices, get_client_settings, get_status, LiveAppState};

/// Creates the live update router.
pub fn live_routes(state: LiveAppState) -> Router {
    Router::new()
        // GET /api/live/:content_id/settings
        .route("/api/live/:content_id/settings", get(get_client_settings))
        // GET /api/live/notices
        .route("/api/live/notices", get(drain_notices))
        // GET /api/live/status
        .route("/api/live/status", get(get_status))
        .with_state(state)
}
