//! Room key derivation.
//!
//! A room key names the broker channel that carries events for one content
//! item. It is an HMAC-SHA256 over the content id concatenated with the
//! item's current status, so a status change (draft -> publish) moves the
//! audience to a fresh room and stale subscriptions stop receiving events.
//!
//! The HMAC key is a fixed scheme label, optionally prefixed by a site
//! secret. The label keeps room keys from colliding with any other keyed
//! hash the host computes from the same secret.

use std::fmt;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::content::{ContentId, ContentStatus};

type HmacSha256 = Hmac<Sha256>;

/// Scheme label used as (the suffix of) the HMAC key.
pub const ROOM_KEY_SCHEME: &str = "live-bridge-room";

/// Broker channel name for one room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(String);

impl RoomKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Post-processing hook applied to every derived key.
pub type RoomKeyFilter = Arc<dyn Fn(RoomKey, ContentId) -> RoomKey + Send + Sync>;

/// Computes room keys from `(content id, status)` pairs.
#[derive(Clone, Default)]
pub struct RoomKeyDeriver {
    secret: Option<SecretString>,
    filter: Option<RoomKeyFilter>,
}

impl RoomKeyDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mixes a site secret into the HMAC key.
    pub fn with_secret(mut self, secret: SecretString) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Installs a filter that may rewrite each computed key.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(RoomKey, ContentId) -> RoomKey + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Derives the room key for a content item in the given status.
    ///
    /// The id and status are hashed back to back with no delimiter, so
    /// statuses are assumed to be words that do not start with a digit.
    pub fn derive(&self, content_id: ContentId, status: &ContentStatus) -> RoomKey {
        let key = RoomKey(self.digest(content_id, status));
        match &self.filter {
            Some(filter) => filter(key, content_id),
            None => key,
        }
    }

    fn digest(&self, content_id: ContentId, status: &ContentStatus) -> String {
        let mut hmac_key = self
            .secret
            .as_ref()
            .map(|s| s.expose_secret().clone())
            .unwrap_or_default();
        hmac_key.push_str(ROOM_KEY_SCHEME);

        let mut mac = HmacSha256::new_from_slice(hmac_key.as_bytes()).expect("HMAC accepts any key");
        mac.update(content_id.to_string().as_bytes());
        mac.update(status.as_str().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for RoomKeyDeriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomKeyDeriver")
            .field("has_secret", &self.secret.is_some())
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn status(s: &str) -> ContentStatus {
        ContentStatus::new(s)
    }

    #[test]
    fn key_is_hex_encoded_sha256() {
        let key = RoomKeyDeriver::new().derive(ContentId::new(42), &status("publish"));
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn key_matches_hmac_of_concatenated_id_and_status() {
        let mut mac = HmacSha256::new_from_slice(ROOM_KEY_SCHEME.as_bytes()).unwrap();
        mac.update(b"42publish");
        let expected = hex::encode(mac.finalize().into_bytes());

        let key = RoomKeyDeriver::new().derive(ContentId::new(42), &status("publish"));
        assert_eq!(key.as_str(), expected);
    }

    #[test]
    fn id_and_status_are_hashed_without_delimiter() {
        let deriver = RoomKeyDeriver::new();
        assert_eq!(
            deriver.derive(ContentId::new(1), &status("2publish")),
            deriver.derive(ContentId::new(12), &status("publish"))
        );
    }

    #[test]
    fn status_change_moves_the_room() {
        let deriver = RoomKeyDeriver::new();
        let draft = deriver.derive(ContentId::new(7), &status("draft"));
        let published = deriver.derive(ContentId::new(7), &status("publish"));
        assert_ne!(draft, published);
    }

    #[test]
    fn secret_changes_the_key() {
        let plain = RoomKeyDeriver::new().derive(ContentId::new(1), &status("publish"));
        let salted = RoomKeyDeriver::new()
            .with_secret(SecretString::new("site-salt".to_string()))
            .derive(ContentId::new(1), &status("publish"));
        assert_ne!(plain, salted);
    }

    #[test]
    fn filter_rewrites_the_computed_key() {
        let deriver = RoomKeyDeriver::new()
            .with_filter(|key, id| RoomKey::new(format!("site-a:{}:{}", id, key)));
        let key = deriver.derive(ContentId::new(9), &status("publish"));

        let unfiltered = RoomKeyDeriver::new().derive(ContentId::new(9), &status("publish"));
        assert_eq!(key.as_str(), format!("site-a:9:{}", unfiltered));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let deriver = RoomKeyDeriver::new().with_secret(SecretString::new("hunter2".to_string()));
        let rendered = format!("{:?}", deriver);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("has_secret: true"));
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(id in any::<u64>(), s in "[a-z_-]{0,20}") {
            let deriver = RoomKeyDeriver::new();
            let a = deriver.derive(ContentId::new(id), &status(&s));
            let b = deriver.derive(ContentId::new(id), &status(&s));
            prop_assert_eq!(a, b);
        }

        #[test]
        fn different_status_gives_different_room(
            id in any::<u64>(),
            a in "[a-z]{1,12}",
            b in "[a-z]{1,12}",
        ) {
            prop_assume!(a != b);
            let deriver = RoomKeyDeriver::new();
            prop_assert_ne!(
                deriver.derive(ContentId::new(id), &status(&a)),
                deriver.derive(ContentId::new(id), &status(&b))
            );
        }
    }
}
