//! Built-in English strings.

use crate::domain::broadcast::MessageKey;
use crate::ports::Localizer;

/// Localizer returning the default English text for every key.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn translate(&self, key: MessageKey) -> String {
        let text = match key {
            MessageKey::BrokerConnectionFailed => {
                "Live updates are disabled: unable to connect to the message broker. \
                 Check the broker host and port settings."
            }
            MessageKey::UnableToConnect => {
                "Unable to connect to the live update server. New entries will not appear \
                 until you reload the page."
            }
        };
        text.to_string()
    }
}
