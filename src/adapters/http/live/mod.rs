//! HTTP adapter for live update endpoints.
//!
//! - `GET /api/live/:content_id/settings` - Client settings for a content item
//! - `GET /api/live/notices` - Drain pending operator notices
//! - `GET /api/live/status` - Broker connection status

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::LiveAppState;
pub use routes::live_routes;
