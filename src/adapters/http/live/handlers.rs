//! HTTP handlers for live update endpoints.
//!
//! None of these can fail: a bridge without a broker still answers with
//! its settings and status.

use std::sync::Arc;

use axum::extract::{Json, Path, State};

use crate::application::LiveBridge;
use crate::domain::broadcast::ContentId;

use super::dto::{ClientSettings, NoticesResponse, StatusResponse};

/// Shared state for the live update routes.
#[derive(Clone)]
pub struct LiveAppState {
    pub bridge: Arc<LiveBridge>,
}

/// GET /api/live/:content_id/settings
pub async fn get_client_settings(
    State(state): State<LiveAppState>,
    Path(content_id): Path<u64>,
) -> Json<ClientSettings> {
    Json(state.bridge.client_settings_for(ContentId::new(content_id)))
}

/// GET /api/live/notices
pub async fn drain_notices(State(state): State<LiveAppState>) -> Json<NoticesResponse> {
    Json(NoticesResponse {
        notices: state.bridge.pending_notices(),
    })
}

/// GET /api/live/status
pub async fn get_status(State(state): State<LiveAppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        state: state.bridge.state().to_string(),
        connected: state.bridge.is_connected(),
    })
}
