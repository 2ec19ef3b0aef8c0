//! Broker connection lifecycle and failure types.
//!
//! ```text
//! Unconnected --[handshake ok]----> Connected
//! Unconnected --[handshake error]--> Failed
//! ```
//!
//! `Connected` and `Failed` are terminal for the life of the process.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::domain::foundation::StateMachine;

/// State of the single shared broker connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Unconnected,
    Connected,
    Failed,
}

impl StateMachine for ConnectionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConnectionState::*;
        matches!((self, target), (Unconnected, Connected) | (Unconnected, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConnectionState::*;
        match self {
            Unconnected => vec![Connected, Failed],
            Connected | Failed => vec![],
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Unconnected => "unconnected",
            ConnectionState::Connected => "connected",
            ConnectionState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Why the broker handshake failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("Broker handshake timed out after {0:?}")]
    Timeout(Duration),

    #[error("Broker unreachable: {0}")]
    Unreachable(String),

    #[error("Broker protocol error: {0}")]
    Protocol(String),
}

/// Why a single publish did not reach the broker.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Broker publish failed: {0}")]
    Transport(String),
}
