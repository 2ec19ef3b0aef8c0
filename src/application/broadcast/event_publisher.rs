//! Event publisher - relays named events to the room of a content item.
//!
//! Publishing is best-effort and never fails the caller:
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | Broker not connected | `Skipped`, nothing logged |
//! | No content in scope | `NoContent` |
//! | Serialization or transport error | `Dropped`, logged at `warn` |
//! | Broker accepted the message | `Published` |
//!
//! Callers that treat an emit as the end of a request (an AJAX handler that
//! answers nothing else, for instance) must end their own handling after
//! calling it; the publisher has no side effect beyond the broker call.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::broadcast::{
    ContentId, EventEnvelope, PublishError, RoomKey, RoomKeyDeriver,
};
use crate::ports::ContentContext;

use super::connection_manager::BrokerConnectionManager;

/// What happened to one emit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The broker accepted the message on this room's channel.
    Published { room: RoomKey },
    /// Broker not connected; nothing was sent.
    Skipped,
    /// No content item in scope to address.
    NoContent,
    /// The message could not be encoded or sent.
    Dropped,
}

impl EmitOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, EmitOutcome::Published { .. })
    }
}

pub struct EventPublisher {
    connection: Arc<BrokerConnectionManager>,
    deriver: RoomKeyDeriver,
    content: Arc<dyn ContentContext>,
}

impl EventPublisher {
    pub fn new(
        connection: Arc<BrokerConnectionManager>,
        deriver: RoomKeyDeriver,
        content: Arc<dyn ContentContext>,
    ) -> Self {
        Self {
            connection,
            deriver,
            content,
        }
    }

    /// Emit to the room of the content item currently in scope.
    pub async fn emit<T>(&self, event_name: &str, payload: &T) -> EmitOutcome
    where
        T: Serialize + ?Sized,
    {
        if !self.connection.is_connected() {
            return EmitOutcome::Skipped;
        }
        match self.content.current_content() {
            Some(content_id) => self.emit_for(content_id, event_name, payload).await,
            None => {
                debug!(event = event_name, "No content in scope, event not addressed");
                EmitOutcome::NoContent
            }
        }
    }

    /// Emit to the room of a specific content item.
    pub async fn emit_for<T>(&self, content_id: ContentId, event_name: &str, payload: &T) -> EmitOutcome
    where
        T: Serialize + ?Sized,
    {
        let Some(emitter) = self.connection.emitter() else {
            return EmitOutcome::Skipped;
        };

        let room = self.room_key_for(content_id);
        match Self::encode(event_name, payload) {
            Ok(body) => match emitter.publish(room.as_str(), &body).await {
                Ok(()) => {
                    debug!(event = event_name, room = %room, "Published event");
                    EmitOutcome::Published { room }
                }
                Err(error) => Self::dropped(event_name, &room, error),
            },
            Err(error) => Self::dropped(event_name, &room, error),
        }
    }

    /// Room key for a content item in its current status.
    pub fn room_key_for(&self, content_id: ContentId) -> RoomKey {
        let status = self.content.status_of(content_id).unwrap_or_default();
        self.deriver.derive(content_id, &status)
    }

    /// Room key for the content item in scope, if any.
    pub fn current_room_key(&self) -> Option<RoomKey> {
        self.content
            .current_content()
            .map(|content_id| self.room_key_for(content_id))
    }

    fn encode<T: Serialize + ?Sized>(event_name: &str, payload: &T) -> Result<String, PublishError> {
        Ok(EventEnvelope::new(event_name, payload)?.to_json()?)
    }

    fn dropped(event_name: &str, room: &RoomKey, error: PublishError) -> EmitOutcome {
        warn!(event = event_name, room = %room, error = %error, "Dropped event");
        EmitOutcome::Dropped
    }
}

impl std::fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPublisher")
            .field("connection", &self.connection)
            .field("deriver", &self.deriver)
            .finish()
    }
}
