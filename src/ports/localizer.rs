//! Localizer port - Translation of user-facing strings.

use crate::domain::broadcast::MessageKey;

/// Turns a message key into text in the host's current locale.
pub trait Localizer: Send + Sync {
    fn translate(&self, key: MessageKey) -> String;
}
