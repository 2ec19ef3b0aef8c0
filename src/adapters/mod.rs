//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the bridge to external systems:
//! - `broker` - Broker implementations (Redis, in-memory)
//! - `host` - Host-side content lookup, notice queue, localization
//! - `http` - Axum routes for client settings and operator notices

pub mod broker;
pub mod host;
pub mod http;

pub use broker::{InMemoryBroker, PublishedMessage, RedisConnector};
pub use host::{EnglishLocalizer, InMemoryNoticeBoard, StaticContentContext};
