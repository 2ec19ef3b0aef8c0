//! Broadcast orchestration.
//!
//! ```text
//! SettingsResolver ──► BrokerConnectionManager ──► EventPublisher ──► BrokerEmitter
//!                              │
//!                              └── on failure ──► FailureReporter ──► NoticeSink
//! ```
//!
//! [`LiveBridge`] wires these together and is what the host holds.

mod connection_manager;
mod event_publisher;
mod failure_reporter;
mod live_bridge;

pub use connection_manager::BrokerConnectionManager;
pub use event_publisher::{EmitOutcome, EventPublisher};
pub use failure_reporter::FailureReporter;
pub use live_bridge::{BridgeDependencies, ClientSettings, LiveBridge};
