//! In-process operator notice queue.

use std::sync::Mutex;

use crate::domain::broadcast::OperatorNotice;
use crate::ports::NoticeSink;

/// Holds notices until the host's next admin render drains them.
#[derive(Debug, Default)]
pub struct InMemoryNoticeBoard {
    notices: Mutex<Vec<OperatorNotice>>,
}

impl InMemoryNoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notices waiting to be rendered.
    pub fn pending(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl NoticeSink for InMemoryNoticeBoard {
    fn push(&self, notice: OperatorNotice) {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }

    fn drain(&self) -> Vec<OperatorNotice> {
        std::mem::take(
            &mut *self
                .notices
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}
