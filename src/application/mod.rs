//! Application layer - orchestrates domain operations and coordinates between ports.

pub mod broadcast;

pub use broadcast::{
    BridgeDependencies, BrokerConnectionManager, ClientSettings, EmitOutcome, EventPublisher,
    FailureReporter, LiveBridge,
};
