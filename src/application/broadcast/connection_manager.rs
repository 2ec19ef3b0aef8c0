//! Broker connection manager.
//!
//! Owns the single shared broker connection. The handshake runs at most
//! once per manager, in a task the manager spawns: concurrent callers of
//! [`BrokerConnectionManager::connect`] wait on the same attempt and all
//! observe its outcome, and a caller that gives up waiting does not abandon
//! it. A failed handshake is final; there is no reconnect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::broadcast::{ConnectionError, ConnectionSettings, ConnectionState};
use crate::domain::foundation::StateMachine;
use crate::ports::{BrokerConnector, BrokerEmitter};

use super::failure_reporter::FailureReporter;

/// Settled outcome of the handshake.
enum Settled {
    Connected(Arc<dyn BrokerEmitter>),
    Failed(ConnectionError),
}

impl Settled {
    fn state(&self) -> ConnectionState {
        match self {
            Settled::Connected(_) => ConnectionState::Connected,
            Settled::Failed(_) => ConnectionState::Failed,
        }
    }
}

/// State shared between the manager and its handshake task.
struct Handshake {
    connector: Arc<dyn BrokerConnector>,
    reporter: Arc<FailureReporter>,
    connect_timeout: Duration,
    outcome: OnceCell<Settled>,
    state: watch::Sender<ConnectionState>,
}

impl Handshake {
    async fn run(&self, settings: ConnectionSettings) {
        info!(
            host = %settings.broker_host,
            port = settings.broker_port,
            timeout = ?self.connect_timeout,
            "Connecting to broker"
        );

        let result = tokio::time::timeout(self.connect_timeout, self.connector.connect(&settings))
            .await
            .unwrap_or(Err(ConnectionError::Timeout(self.connect_timeout)));

        let settled = match result {
            Ok(emitter) => {
                info!(emitter = emitter.kind(), "Connected to broker");
                Settled::Connected(emitter)
            }
            Err(error) => {
                self.reporter.report_connection_failure(&error);
                Settled::Failed(error)
            }
        };

        let next = settled.state();
        // Outcome first: waiters read it as soon as the state settles
        if self.outcome.set(settled).is_err() {
            return;
        }
        self.state.send_if_modified(|state| match state.transition_to(next) {
            Ok(settled) => {
                *state = settled;
                true
            }
            Err(e) => {
                warn!(error = %e, "Ignoring broker state change");
                false
            }
        });
        debug!(state = %next, "Broker connection settled");
    }
}

pub struct BrokerConnectionManager {
    handshake: Arc<Handshake>,
    started: AtomicBool,
}

impl BrokerConnectionManager {
    pub fn new(
        connector: Arc<dyn BrokerConnector>,
        reporter: Arc<FailureReporter>,
        connect_timeout: Duration,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Unconnected);
        Self {
            handshake: Arc::new(Handshake {
                connector,
                reporter,
                connect_timeout,
                outcome: OnceCell::new(),
                state,
            }),
            started: AtomicBool::new(false),
        }
    }

    /// Start the handshake if it has not started yet and wait for it to settle.
    ///
    /// Returns the settled outcome; a cached failure is returned again
    /// without another attempt and without another operator notice.
    /// Dropping the returned future does not cancel the handshake.
    pub async fn connect(&self, settings: &ConnectionSettings) -> Result<(), ConnectionError> {
        let mut state = self.handshake.state.subscribe();

        if !self.started.swap(true, Ordering::AcqRel) {
            let handshake = Arc::clone(&self.handshake);
            let settings = settings.clone();
            tokio::spawn(async move { handshake.run(settings).await });
        }

        // The sender lives in `self`, so this only returns once settled
        let _ = state.wait_for(|state| state.is_terminal()).await;

        match self.handshake.outcome.get() {
            Some(Settled::Connected(_)) => Ok(()),
            Some(Settled::Failed(error)) => Err(error.clone()),
            None => Err(ConnectionError::Protocol(
                "handshake ended without an outcome".to_string(),
            )),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        *self.handshake.state.borrow()
    }

    /// True only when connected AND an emitter of the connector's kind exists.
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected && self.emitter().is_some()
    }

    /// The emitter, if the connection is up and the emitter is the expected kind.
    pub fn emitter(&self) -> Option<Arc<dyn BrokerEmitter>> {
        match self.handshake.outcome.get() {
            Some(Settled::Connected(emitter))
                if emitter.kind() == self.handshake.connector.emitter_kind() =>
            {
                Some(Arc::clone(emitter))
            }
            _ => None,
        }
    }

    /// The handshake error, if the connection failed.
    pub fn failure(&self) -> Option<&ConnectionError> {
        match self.handshake.outcome.get() {
            Some(Settled::Failed(error)) => Some(error),
            _ => None,
        }
    }
}

impl std::fmt::Debug for BrokerConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerConnectionManager")
            .field("state", &self.state())
            .field("connect_timeout", &self.handshake.connect_timeout)
            .finish()
    }
}
