//! Wire envelope understood by the real-time gateway.
//!
//! The gateway subscribes to the broker and expects each message body to be
//! a JSON object of the form:
//!
//! ```json
//! { "name": "new_entry", "args": ["{\"id\":42}"] }
//! ```
//!
//! `args[0]` is the event payload, itself JSON-encoded into a string.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A named event plus its serialized payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub name: String,
    pub args: Vec<String>,
}

impl EventEnvelope {
    /// Builds an envelope, serializing `payload` into `args[0]`.
    pub fn new<T: Serialize + ?Sized>(
        name: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: name.into(),
            args: vec![serde_json::to_string(payload)?],
        })
    }

    /// Encodes the envelope as the message body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a message body published by [`to_json`](Self::to_json).
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Decodes the first argument back into a payload value.
    pub fn payload<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.args.first().map(|raw| serde_json::from_str(raw))
    }
}
