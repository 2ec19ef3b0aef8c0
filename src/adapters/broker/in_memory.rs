//! In-memory broker for testing.
//!
//! Records every handshake attempt and every published message so tests can
//! assert on exactly what would have reached the broker. Can be configured to
//! refuse or stall the handshake to exercise failure paths.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::broadcast::{ConnectionError, ConnectionSettings, EventEnvelope, PublishError};
use crate::ports::{BrokerConnector, BrokerEmitter};

const IN_MEMORY_EMITTER_KIND: &str = "in-memory";

/// A message captured by the in-memory broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub channel: String,
    pub body: String,
}

impl PublishedMessage {
    /// Decode the body as a gateway envelope.
    pub fn envelope(&self) -> Result<EventEnvelope, serde_json::Error> {
        EventEnvelope::from_json(&self.body)
    }
}

#[derive(Debug, Default)]
struct BrokerLog {
    connect_attempts: AtomicUsize,
    published: RwLock<Vec<PublishedMessage>>,
}

/// In-memory broker acting as both connector and recorder.
///
/// Clones share the same log, so a test can keep one handle while the
/// bridge owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBroker {
    log: Arc<BrokerLog>,
    refuse_with: Option<ConnectionError>,
    handshake_delay: Option<Duration>,
}

impl InMemoryBroker {
    /// A broker that accepts the handshake.
    pub fn new() -> Self {
        Self::default()
    }

    /// A broker whose handshake always fails as unreachable.
    pub fn unreachable() -> Self {
        Self::refusing(ConnectionError::Unreachable("connection refused".to_string()))
    }

    /// A broker whose handshake always fails with `error`.
    pub fn refusing(error: ConnectionError) -> Self {
        Self {
            refuse_with: Some(error),
            ..Self::default()
        }
    }

    /// Delay the handshake (to exercise connect timeouts and concurrency).
    pub fn with_handshake_delay(mut self, delay: Duration) -> Self {
        self.handshake_delay = Some(delay);
        self
    }

    // === Test Helpers ===

    /// Number of handshakes attempted.
    pub fn connect_attempts(&self) -> usize {
        self.log.connect_attempts.load(Ordering::SeqCst)
    }

    /// Every message published so far.
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.log
            .published
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of messages published so far.
    pub fn publish_count(&self) -> usize {
        self.log
            .published
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Messages published on one channel.
    pub fn messages_on(&self, channel: &str) -> Vec<PublishedMessage> {
        self.published()
            .into_iter()
            .filter(|m| m.channel == channel)
            .collect()
    }
}

#[async_trait]
impl BrokerConnector for InMemoryBroker {
    async fn connect(
        &self,
        _settings: &ConnectionSettings,
    ) -> Result<Arc<dyn BrokerEmitter>, ConnectionError> {
        self.log.connect_attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.handshake_delay {
            tokio::time::sleep(delay).await;
        }

        match &self.refuse_with {
            Some(error) => Err(error.clone()),
            None => Ok(Arc::new(InMemoryEmitter {
                log: Arc::clone(&self.log),
            })),
        }
    }

    fn emitter_kind(&self) -> &'static str {
        IN_MEMORY_EMITTER_KIND
    }
}

struct InMemoryEmitter {
    log: Arc<BrokerLog>,
}

#[async_trait]
impl BrokerEmitter for InMemoryEmitter {
    async fn publish(&self, channel: &str, body: &str) -> Result<(), PublishError> {
        self.log
            .published
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(PublishedMessage {
                channel: channel.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }

    fn kind(&self) -> &'static str {
        IN_MEMORY_EMITTER_KIND
    }
}
