//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the bridge and the outside world. Adapters implement these ports.
//!
//! - `BrokerConnector` / `BrokerEmitter` - Handshake and publish to the broker
//! - `ContentContext` - Host lookup of the content in scope and its status
//! - `NoticeSink` - Host operator notice queue
//! - `Localizer` - Host translation of user-facing strings

mod broker;
mod content_context;
mod localizer;
mod notice_sink;

pub use broker::{BrokerConnector, BrokerEmitter};
pub use content_context::ContentContext;
pub use localizer::Localizer;
pub use notice_sink::NoticeSink;
