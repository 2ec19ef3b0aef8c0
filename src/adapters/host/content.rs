//! Fixed content context for tests and the command-line emitter.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::broadcast::{ContentId, ContentStatus};
use crate::ports::ContentContext;

/// Content context backed by a map of known statuses.
#[derive(Debug, Default)]
pub struct StaticContentContext {
    current: Option<ContentId>,
    statuses: RwLock<HashMap<ContentId, ContentStatus>>,
}

impl StaticContentContext {
    /// Context with nothing in scope.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Context with one item in scope.
    pub fn single(id: ContentId, status: impl Into<ContentStatus>) -> Self {
        let context = Self {
            current: Some(id),
            ..Self::default()
        };
        context.set_status(id, status);
        context
    }

    /// Record (or change) an item's status.
    pub fn set_status(&self, id: ContentId, status: impl Into<ContentStatus>) {
        self.statuses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, status.into());
    }
}

impl ContentContext for StaticContentContext {
    fn current_content(&self) -> Option<ContentId> {
        self.current
    }

    fn status_of(&self, id: ContentId) -> Option<ContentStatus> {
        self.statuses
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&id)
            .cloned()
    }
}
