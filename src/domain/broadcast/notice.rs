//! Operator-facing notices and the message keys they are built from.

use serde::Serialize;

/// Translatable strings the bridge surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Admin warning shown after the broker handshake failed.
    BrokerConnectionFailed,
    /// Shown by the browser client when it cannot reach the gateway.
    UnableToConnect,
}

/// Severity of an operator notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
}

/// A message waiting to be rendered on the host's admin surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorNotice {
    pub level: NoticeLevel,
    pub message: String,
}

impl OperatorNotice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}
