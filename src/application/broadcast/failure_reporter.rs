//! One-shot reporting of broker connection failure to operators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

use crate::domain::broadcast::{ConnectionError, MessageKey, OperatorNotice};
use crate::ports::{Localizer, NoticeSink};

/// Queues a localized admin warning the first time the broker connection
/// fails. Later reports are ignored. Never raises.
pub struct FailureReporter {
    notices: Arc<dyn NoticeSink>,
    localizer: Arc<dyn Localizer>,
    reported: AtomicBool,
}

impl FailureReporter {
    pub fn new(notices: Arc<dyn NoticeSink>, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            notices,
            localizer,
            reported: AtomicBool::new(false),
        }
    }

    /// Record the failure. Returns `true` if this call queued the notice.
    pub fn report_connection_failure(&self, error: &ConnectionError) -> bool {
        if self.reported.swap(true, Ordering::SeqCst) {
            return false;
        }

        warn!(error = %error, "Broker connection failed, live updates disabled");
        let message = self.localizer.translate(MessageKey::BrokerConnectionFailed);
        self.notices.push(OperatorNotice::warning(message));
        true
    }

    /// Whether a failure has been reported.
    pub fn has_reported(&self) -> bool {
        self.reported.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for FailureReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailureReporter")
            .field("reported", &self.has_reported())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::host::{EnglishLocalizer, InMemoryNoticeBoard};
    use crate::domain::broadcast::NoticeLevel;

    fn reporter() -> (FailureReporter, Arc<InMemoryNoticeBoard>) {
        let board = Arc::new(InMemoryNoticeBoard::new());
        let reporter = FailureReporter::new(board.clone(), Arc::new(EnglishLocalizer));
        (reporter, board)
    }

    #[test]
    fn first_report_queues_a_warning() {
        let (reporter, board) = reporter();

        let queued =
            reporter.report_connection_failure(&ConnectionError::Unreachable("refused".into()));

        assert!(queued);
        assert!(reporter.has_reported());
        let notices = board.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert_eq!(
            notices[0].message,
            EnglishLocalizer.translate(MessageKey::BrokerConnectionFailed)
        );
    }

    #[test]
    fn repeated_reports_queue_only_once() {
        let (reporter, board) = reporter();
        let error = ConnectionError::Protocol("bad reply".into());

        assert!(reporter.report_connection_failure(&error));
        assert!(!reporter.report_connection_failure(&error));
        assert!(!reporter.report_connection_failure(&error));

        assert_eq!(board.pending(), 1);
    }

    #[test]
    fn nothing_reported_initially() {
        let (reporter, board) = reporter();
        assert!(!reporter.has_reported());
        assert_eq!(board.pending(), 0);
    }
}
