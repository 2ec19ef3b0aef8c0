//! NoticeSink port - The host's operator notice channel.

use crate::domain::broadcast::OperatorNotice;

/// Queue of notices rendered on the host's next admin pass.
pub trait NoticeSink: Send + Sync {
    /// Queue a notice.
    fn push(&self, notice: OperatorNotice);

    /// Take every queued notice, oldest first.
    fn drain(&self) -> Vec<OperatorNotice>;
}
