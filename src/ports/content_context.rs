//! ContentContext port - What the host knows about the content in scope.

use crate::domain::broadcast::{ContentId, ContentStatus};

/// Supplied by the host application.
///
/// `current_content` is the item the triggering request is about (the
/// live page being edited, for instance). `status_of` reports an item's
/// publication status at the time of the call.
pub trait ContentContext: Send + Sync {
    /// The content item currently in scope, if any.
    fn current_content(&self) -> Option<ContentId>;

    /// Current status of a content item. `None` if the item is unknown.
    fn status_of(&self, id: ContentId) -> Option<ContentStatus>;
}
