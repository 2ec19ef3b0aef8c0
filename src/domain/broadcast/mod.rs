//! Broadcast domain: everything the bridge computes without touching I/O.
//!
//! - [`settings`] - Gateway/broker settings and their one-time resolution
//! - [`room_key`] - Keyed-hash room addressing
//! - [`envelope`] - Wire body published to the broker
//! - [`connection`] - Connection lifecycle and failure types
//! - [`notice`] - Operator notices and translatable message keys

pub mod connection;
pub mod content;
pub mod envelope;
pub mod notice;
pub mod room_key;
pub mod settings;

pub use connection::{ConnectionError, ConnectionState, PublishError};
pub use content::{ContentId, ContentStatus};
pub use envelope::EventEnvelope;
pub use notice::{MessageKey, NoticeLevel, OperatorNotice};
pub use room_key::{RoomKey, RoomKeyDeriver, RoomKeyFilter, ROOM_KEY_SCHEME};
pub use settings::{
    BroadcastOverrides, ConnectionSettings, SettingsResolver, SiteOrigin, DEFAULT_BROKER_HOST,
    DEFAULT_BROKER_PORT, DEFAULT_GATEWAY_PORT,
};
