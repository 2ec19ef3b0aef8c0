//! Broker adapters.
//!
//! - `RedisConnector` - Redis pub/sub (production)
//! - `InMemoryBroker` - Recording connector/emitter for tests

mod in_memory;
mod redis;

pub use self::in_memory::{InMemoryBroker, PublishedMessage};
pub use self::redis::{RedisConnector, RedisEmitter};
