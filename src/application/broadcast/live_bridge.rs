//! The bridge context object.
//!
//! One `LiveBridge` is built per process (or per host application) and
//! shared by every request handler. It resolves settings once, connects to
//! the broker at most once, and exposes the operations the host needs:
//! emit events, export client settings, drain operator notices.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{BridgeConfig, ValidationError};
use crate::domain::broadcast::{
    ConnectionSettings, ConnectionState, ContentId, MessageKey, OperatorNotice, RoomKey,
    RoomKeyDeriver, SettingsResolver,
};
use crate::ports::{BrokerConnector, ContentContext, Localizer, NoticeSink};

use super::connection_manager::BrokerConnectionManager;
use super::event_publisher::{EmitOutcome, EventPublisher};
use super::failure_reporter::FailureReporter;

/// Settings handed to the browser-side client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Gateway URL the client connects to
    pub url: String,
    /// Room to join; absent when no content is in scope
    pub room_key: Option<RoomKey>,
    /// Localized message shown when the gateway is unreachable
    pub unable_to_connect: String,
}

/// Host-provided collaborators.
#[derive(Clone)]
pub struct BridgeDependencies {
    pub connector: Arc<dyn BrokerConnector>,
    pub content: Arc<dyn ContentContext>,
    pub notices: Arc<dyn NoticeSink>,
    pub localizer: Arc<dyn Localizer>,
}

pub struct LiveBridge {
    settings: SettingsResolver,
    connection: Arc<BrokerConnectionManager>,
    publisher: EventPublisher,
    reporter: Arc<FailureReporter>,
    notices: Arc<dyn NoticeSink>,
    localizer: Arc<dyn Localizer>,
}

impl LiveBridge {
    pub fn new(
        settings: SettingsResolver,
        deriver: RoomKeyDeriver,
        connect_timeout: Duration,
        deps: BridgeDependencies,
    ) -> Self {
        let reporter = Arc::new(FailureReporter::new(
            Arc::clone(&deps.notices),
            Arc::clone(&deps.localizer),
        ));
        let connection = Arc::new(BrokerConnectionManager::new(
            deps.connector,
            Arc::clone(&reporter),
            connect_timeout,
        ));
        let publisher = EventPublisher::new(Arc::clone(&connection), deriver, deps.content);

        Self {
            settings,
            connection,
            publisher,
            reporter,
            notices: deps.notices,
            localizer: deps.localizer,
        }
    }

    /// Build from loaded configuration. Install a room key filter with
    /// [`LiveBridge::new`] instead when addressing must be overridden.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the configured site URL cannot be parsed.
    pub fn from_config(config: &BridgeConfig, deps: BridgeDependencies) -> Result<Self, ValidationError> {
        let settings = SettingsResolver::new(config.site.origin()?, config.broadcast.overrides());

        let mut deriver = RoomKeyDeriver::new();
        if let Some(secret) = &config.broadcast.room_key_secret {
            deriver = deriver.with_secret(secret.clone());
        }

        Ok(Self::new(
            settings,
            deriver,
            config.broadcast.connect_timeout(),
            deps,
        ))
    }

    /// Resolve settings and connect to the broker. Idempotent; never fails.
    pub async fn start(&self) -> ConnectionState {
        // Failures are already reported by the connection manager
        let _ = self.connection.connect(self.settings.resolve()).await;
        self.connection.state()
    }

    /// Emit to the room of the content item currently in scope.
    ///
    /// Connects on first use. Never fails; see [`EmitOutcome`].
    pub async fn emit<T>(&self, event_name: &str, payload: &T) -> EmitOutcome
    where
        T: Serialize + ?Sized,
    {
        self.start().await;
        self.publisher.emit(event_name, payload).await
    }

    /// Emit to the room of a specific content item.
    pub async fn emit_for<T>(&self, content_id: ContentId, event_name: &str, payload: &T) -> EmitOutcome
    where
        T: Serialize + ?Sized,
    {
        self.start().await;
        self.publisher.emit_for(content_id, event_name, payload).await
    }

    /// Resolved connection settings.
    pub fn settings(&self) -> &ConnectionSettings {
        self.settings.resolve()
    }

    pub fn state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Whether a connection failure has been surfaced to operators.
    pub fn failure_reported(&self) -> bool {
        self.reporter.has_reported()
    }

    /// Client settings for the content item in scope.
    pub fn client_settings(&self) -> ClientSettings {
        self.build_client_settings(self.publisher.current_room_key())
    }

    /// Client settings for a specific content item.
    pub fn client_settings_for(&self, content_id: ContentId) -> ClientSettings {
        self.build_client_settings(Some(self.publisher.room_key_for(content_id)))
    }

    fn build_client_settings(&self, room_key: Option<RoomKey>) -> ClientSettings {
        ClientSettings {
            url: self.settings.resolve().gateway_url.clone(),
            room_key,
            unable_to_connect: self.localizer.translate(MessageKey::UnableToConnect),
        }
    }

    /// Take the operator notices queued since the last call.
    pub fn pending_notices(&self) -> Vec<OperatorNotice> {
        self.notices.drain()
    }
}

impl std::fmt::Debug for LiveBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveBridge")
            .field("settings", &self.settings)
            .field("publisher", &self.publisher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::broker::InMemoryBroker;
    use crate::adapters::host::{EnglishLocalizer, InMemoryNoticeBoard, StaticContentContext};
    use crate::config::{BroadcastConfig, SiteConfig};
    use crate::domain::broadcast::{BroadcastOverrides, ContentStatus, SiteOrigin};
    use secrecy::SecretString;
    use serde_json::json;

    fn deps(broker: &InMemoryBroker) -> BridgeDependencies {
        BridgeDependencies {
            connector: Arc::new(broker.clone()),
            content: Arc::new(StaticContentContext::single(ContentId::new(42), "publish")),
            notices: Arc::new(InMemoryNoticeBoard::new()),
            localizer: Arc::new(EnglishLocalizer),
        }
    }

    fn bridge(broker: &InMemoryBroker, deriver: RoomKeyDeriver) -> LiveBridge {
        LiveBridge::new(
            SettingsResolver::new(SiteOrigin::new("https", "example.com"), BroadcastOverrides::default()),
            deriver,
            Duration::from_secs(1),
            deps(broker),
        )
    }

    #[tokio::test]
    async fn emit_connects_lazily() {
        let broker = InMemoryBroker::new();
        let bridge = bridge(&broker, RoomKeyDeriver::new());
        assert_eq!(bridge.state(), ConnectionState::Unconnected);

        let outcome = bridge.emit("new_entry", &json!({"id": 42})).await;

        assert!(outcome.is_published());
        assert!(bridge.is_connected());
        assert_eq!(broker.connect_attempts(), 1);
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let broker = InMemoryBroker::new();
        let bridge = bridge(&broker, RoomKeyDeriver::new());

        assert_eq!(bridge.start().await, ConnectionState::Connected);
        assert_eq!(bridge.start().await, ConnectionState::Connected);
        bridge.emit("new_entry", &json!({})).await;

        assert_eq!(broker.connect_attempts(), 1);
    }

    #[tokio::test]
    async fn failed_bridge_reports_once_and_skips() {
        let broker = InMemoryBroker::unreachable();
        let bridge = bridge(&broker, RoomKeyDeriver::new());

        assert_eq!(bridge.start().await, ConnectionState::Failed);
        for _ in 0..3 {
            assert_eq!(bridge.emit("new_entry", &json!({})).await, EmitOutcome::Skipped);
        }

        assert!(!bridge.is_connected());
        assert!(bridge.failure_reported());
        assert_eq!(bridge.pending_notices().len(), 1);
        assert!(bridge.pending_notices().is_empty());
        assert_eq!(broker.publish_count(), 0);
    }

    #[tokio::test]
    async fn client_settings_carry_gateway_room_and_message() {
        let broker = InMemoryBroker::new();
        let bridge = bridge(&broker, RoomKeyDeriver::new());

        let settings = bridge.client_settings();

        assert_eq!(settings.url, "https://example.com:3000");
        assert_eq!(
            settings.room_key,
            Some(RoomKeyDeriver::new().derive(ContentId::new(42), &ContentStatus::new("publish")))
        );
        assert_eq!(
            settings.unable_to_connect,
            EnglishLocalizer.translate(MessageKey::UnableToConnect)
        );
    }

    #[tokio::test]
    async fn client_settings_match_published_channel() {
        let broker = InMemoryBroker::new();
        let bridge = bridge(&broker, RoomKeyDeriver::new());

        bridge.emit("new_entry", &json!({"id": 1})).await;

        let room = bridge.client_settings().room_key.unwrap();
        assert_eq!(broker.messages_on(room.as_str()).len(), 1);
    }

    #[tokio::test]
    async fn filter_overrides_addressing() {
        let broker = InMemoryBroker::new();
        let deriver = RoomKeyDeriver::new().with_filter(|_, id| RoomKey::new(format!("room-{}", id)));
        let bridge = bridge(&broker, deriver);

        bridge.emit("new_entry", &json!({})).await;

        assert_eq!(broker.messages_on("room-42").len(), 1);
        assert_eq!(bridge.client_settings_for(ContentId::new(7)).room_key, Some(RoomKey::new("room-7")));
    }

    #[test]
    fn from_config_applies_overrides_and_secret() {
        let broker = InMemoryBroker::new();
        let config = BridgeConfig {
            site: SiteConfig {
                url: "https://example.com/live".to_string(),
            },
            broadcast: BroadcastConfig {
                broker_port: Some(6380),
                room_key_secret: Some(SecretString::new("salt".to_string())),
                ..Default::default()
            },
            log_level: String::new(),
        };

        let bridge = LiveBridge::from_config(&config, deps(&broker)).unwrap();

        assert_eq!(bridge.settings().gateway_url, "https://example.com:3000");
        assert_eq!(bridge.settings().broker_port, 6380);
        let unsalted = RoomKeyDeriver::new().derive(ContentId::new(42), &ContentStatus::new("publish"));
        assert_ne!(bridge.client_settings().room_key, Some(unsalted));
    }

    #[test]
    fn from_config_rejects_unparseable_site() {
        let broker = InMemoryBroker::new();
        let config = BridgeConfig {
            site: SiteConfig {
                url: "not a url".to_string(),
            },
            ..Default::default()
        };

        assert!(LiveBridge::from_config(&config, deps(&broker)).is_err());
    }

    #[test]
    fn client_settings_serialize_for_the_browser() {
        let settings = ClientSettings {
            url: "https://example.com:3000".to_string(),
            room_key: Some(RoomKey::new("abc")),
            unable_to_connect: "offline".to_string(),
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(
            value,
            json!({"url": "https://example.com:3000", "room_key": "abc", "unable_to_connect": "offline"})
        );
    }
}
