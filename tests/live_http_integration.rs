//! Integration tests for the live update HTTP routes.
//!
//! These tests send requests through the mounted router:
//! 1. Client settings are served per content item
//! 2. Operator notices are drained exactly once
//! 3. Status reflects the broker connection
//! 4. Unknown paths and malformed ids are rejected by routing

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use live_bridge::adapters::http::{live_routes, LiveAppState};
use live_bridge::adapters::{EnglishLocalizer, InMemoryBroker, InMemoryNoticeBoard, StaticContentContext};
use live_bridge::application::{BridgeDependencies, LiveBridge};
use live_bridge::domain::broadcast::{
    BroadcastOverrides, ContentId, ContentStatus, RoomKeyDeriver, SettingsResolver, SiteOrigin,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(broker: InMemoryBroker) -> (Router, Arc<LiveBridge>) {
    let bridge = Arc::new(LiveBridge::new(
        SettingsResolver::new(SiteOrigin::new("https", "example.com"), BroadcastOverrides::default()),
        RoomKeyDeriver::new(),
        Duration::from_secs(1),
        BridgeDependencies {
            connector: Arc::new(broker),
            content: Arc::new(StaticContentContext::single(ContentId::new(42), "publish")),
            notices: Arc::new(InMemoryNoticeBoard::new()),
            localizer: Arc::new(EnglishLocalizer),
        },
    ));
    let router = live_routes(LiveAppState {
        bridge: Arc::clone(&bridge),
    });
    (router, bridge)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// =============================================================================
// Client settings
// =============================================================================

#[tokio::test]
async fn settings_route_returns_gateway_and_room() {
    let (router, _) = app(InMemoryBroker::new());

    let (status, body) = get(&router, "/api/live/42/settings").await;

    let room = RoomKeyDeriver::new().derive(ContentId::new(42), &ContentStatus::new("publish"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://example.com:3000");
    assert_eq!(body["room_key"], json!(room.as_str()));
    assert!(body["unable_to_connect"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn settings_route_rejects_non_numeric_id() {
    let (router, _) = app(InMemoryBroker::new());

    let (status, _) = get(&router, "/api/live/abc/settings").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Notices and status
// =============================================================================

#[tokio::test]
async fn notices_route_drains_failure_notice_once() {
    let (router, bridge) = app(InMemoryBroker::unreachable());
    bridge.start().await;

    let (status, first) = get(&router, "/api/live/notices").await;
    let (_, second) = get(&router, "/api/live/notices").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["notices"].as_array().map(Vec::len), Some(1));
    assert_eq!(first["notices"][0]["level"], "warning");
    assert_eq!(second["notices"], json!([]));
}

#[tokio::test]
async fn status_route_reflects_connection() {
    let (router, bridge) = app(InMemoryBroker::new());

    let (_, before) = get(&router, "/api/live/status").await;
    bridge.start().await;
    let (status, after) = get(&router, "/api/live/status").await;

    assert_eq!(before, json!({"state": "unconnected", "connected": false}));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, json!({"state": "connected", "connected": true}));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (router, _) = app(InMemoryBroker::new());

    let (status, _) = get(&router, "/api/live/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
