//! HTTP adapters - REST API implementations.

pub mod live;

pub use live::{live_routes, LiveAppState};
