//! Redis-backed broker adapter for production deployments.
//!
//! The handshake opens a multiplexed async connection and confirms it with
//! `PING`. Publishing clones the multiplexed handle and issues `PUBLISH`.

use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::broadcast::{ConnectionError, ConnectionSettings, PublishError};
use crate::ports::{BrokerConnector, BrokerEmitter};

const REDIS_EMITTER_KIND: &str = "redis";

/// Connects to Redis at the resolved broker host/port.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedisConnector;

impl RedisConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BrokerConnector for RedisConnector {
    async fn connect(
        &self,
        settings: &ConnectionSettings,
    ) -> Result<Arc<dyn BrokerEmitter>, ConnectionError> {
        let client = redis::Client::open(settings.broker_url())
            .map_err(|e| ConnectionError::Protocol(e.to_string()))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(classify)?;

        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(classify)?;
        if pong != "PONG" {
            return Err(ConnectionError::Protocol(format!(
                "unexpected PING reply: {}",
                pong
            )));
        }

        Ok(Arc::new(RedisEmitter { conn }))
    }

    fn emitter_kind(&self) -> &'static str {
        REDIS_EMITTER_KIND
    }
}

/// Emitter bound to an established Redis connection.
#[derive(Clone)]
pub struct RedisEmitter {
    conn: MultiplexedConnection,
}

#[async_trait]
impl BrokerEmitter for RedisEmitter {
    async fn publish(&self, channel: &str, body: &str) -> Result<(), PublishError> {
        let mut conn = self.conn.clone();

        // Reply is the subscriber count; delivery is not our concern
        let _receivers: i64 = conn
            .publish(channel, body)
            .await
            .map_err(|e: redis::RedisError| PublishError::Transport(e.to_string()))?;

        Ok(())
    }

    fn kind(&self) -> &'static str {
        REDIS_EMITTER_KIND
    }
}

fn classify(e: redis::RedisError) -> ConnectionError {
    if e.is_connection_refusal() || e.is_io_error() || e.is_connection_dropped() {
        ConnectionError::Unreachable(e.to_string())
    } else {
        ConnectionError::Protocol(e.to_string())
    }
}
