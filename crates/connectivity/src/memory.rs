//! In-memory connector for tests. Enabled by the `test-util` feature.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::connector::{GraphConnector, GraphHandle};
use crate::error::{ProbeFailure, ReleaseError};
use crate::settings::ConnectionSettings;

/// What the stub's liveness check does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubBehavior {
    /// The check succeeds.
    Succeed,
    /// The check fails as if the server were unreachable.
    ServiceUnavailable,
    /// The check fails as if the session expired.
    SessionExpired,
    /// The check fails with an unrecognised error.
    Unclassified(String),
    /// The check never completes.
    Hang,
    /// The check panics.
    Panic,
}

#[derive(Debug)]
struct StubState {
    behavior: StubBehavior,
    fail_on_connect: bool,
    fail_on_close: bool,
    connects: usize,
    closes: usize,
}

/// In-memory [`GraphConnector`] that records how its handles are used.
#[derive(Debug, Clone)]
pub struct StubConnector {
    state: Arc<RwLock<StubState>>,
}

impl StubConnector {
    /// Creates a connector whose handles behave as described.
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            state: Arc::new(RwLock::new(StubState {
                behavior,
                fail_on_connect: false,
                fail_on_close: false,
                connects: 0,
                closes: 0,
            })),
        }
    }

    /// Changes the behavior of subsequently created handles.
    pub fn set_behavior(&self, behavior: StubBehavior) {
        self.state.write().unwrap().behavior = behavior;
    }

    /// Configures acquisition to fail, so no handle is ever created.
    pub fn set_fail_on_connect(&self, fail: bool) {
        self.state.write().unwrap().fail_on_connect = fail;
    }

    /// Configures handles to report an error when closed.
    pub fn set_fail_on_close(&self, fail: bool) {
        self.state.write().unwrap().fail_on_close = fail;
    }

    /// Number of acquisition attempts, successful or not.
    pub fn connect_count(&self) -> usize {
        self.state.read().unwrap().connects
    }

    /// Number of times a handle's release routine ran.
    pub fn close_count(&self) -> usize {
        self.state.read().unwrap().closes
    }
}

#[async_trait]
impl GraphConnector for StubConnector {
    type Handle = StubHandle;

    async fn connect(&self, _settings: &ConnectionSettings) -> Result<StubHandle, ProbeFailure> {
        let mut state = self.state.write().unwrap();
        state.connects += 1;
        if state.fail_on_connect {
            return Err(ProbeFailure::ServiceUnavailable(
                "Connection refused".to_string(),
            ));
        }
        Ok(StubHandle {
            behavior: state.behavior.clone(),
            state: self.state.clone(),
        })
    }
}

/// Handle produced by [`StubConnector`].
#[derive(Debug)]
pub struct StubHandle {
    behavior: StubBehavior,
    state: Arc<RwLock<StubState>>,
}

#[async_trait]
impl GraphHandle for StubHandle {
    async fn verify_connectivity(&self) -> Result<(), ProbeFailure> {
        match &self.behavior {
            StubBehavior::Succeed => Ok(()),
            StubBehavior::ServiceUnavailable => Err(ProbeFailure::ServiceUnavailable(
                "Service unavailable".to_string(),
            )),
            StubBehavior::SessionExpired => {
                Err(ProbeFailure::SessionExpired("Session expired".to_string()))
            }
            StubBehavior::Unclassified(detail) => Err(ProbeFailure::Unclassified(detail.clone())),
            StubBehavior::Hang => std::future::pending().await,
            StubBehavior::Panic => panic!("liveness check panicked"),
        }
    }

    async fn close(self) -> Result<(), ReleaseError> {
        let mut state = self.state.write().unwrap();
        state.closes += 1;
        if state.fail_on_close {
            return Err(ReleaseError("connection already closed".to_string()));
        }
        Ok(())
    }
}
