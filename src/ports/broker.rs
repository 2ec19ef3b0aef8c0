//! Broker ports - Interfaces for reaching the pub/sub broker.
//!
//! The connector performs the one-time handshake and yields an emitter
//! bound to that connection. Adapters exist for Redis (production) and an
//! in-memory recorder (tests).

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::broadcast::{ConnectionError, ConnectionSettings, PublishError};

/// Handshake with the broker.
///
/// Implementations need not enforce a timeout; the connection manager
/// bounds every call.
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    /// Open a connection and return an emitter bound to it.
    async fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Arc<dyn BrokerEmitter>, ConnectionError>;

    /// The [`BrokerEmitter::kind`] this connector produces.
    fn emitter_kind(&self) -> &'static str;
}

/// Publishes message bodies to broker channels.
///
/// Delivery is fire-and-forget: `Ok` means the broker accepted the
/// message, not that any subscriber received it.
#[async_trait]
pub trait BrokerEmitter: Send + Sync {
    /// Publish `body` on `channel`.
    async fn publish(&self, channel: &str, body: &str) -> Result<(), PublishError>;

    /// Short name of the emitter implementation.
    fn kind(&self) -> &'static str;
}
