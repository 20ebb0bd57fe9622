//! Single-shot connectivity prober.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::FutureExt;

use crate::connector::{GraphConnector, GraphHandle};
use crate::error::{ProbeFailure, ProbeOutcome};
use crate::result::ConnectivityResult;
use crate::settings::ConnectionSettings;

/// Verifies database reachability with one handle per call.
///
/// No retries: each call makes exactly one attempt. Handles are never
/// shared between calls.
pub struct Prober<C: GraphConnector> {
    connector: C,
    settings: Arc<ConnectionSettings>,
    timeout: Option<Duration>,
}

impl<C: GraphConnector> Prober<C> {
    /// Creates a prober with no timeout of its own.
    pub fn new(connector: C, settings: Arc<ConnectionSettings>) -> Self {
        Self {
            connector,
            settings,
            timeout: None,
        }
    }

    /// Bounds handle acquisition and the liveness check, each, by `timeout`.
    ///
    /// An elapsed timeout is reported as [`ProbeFailure::ServiceUnavailable`].
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs one probe and returns the tagged outcome.
    #[tracing::instrument(skip(self), fields(uri = %self.settings.endpoint_uri()))]
    pub async fn check(&self) -> ProbeOutcome {
        tracing::info!("attempting to verify Neo4j database connectivity");
        let started = Instant::now();

        let outcome = self.acquire_and_verify().await;

        let label = match &outcome {
            Ok(()) => {
                tracing::info!("successfully verified Neo4j database connectivity");
                "success"
            }
            Err(failure) => {
                tracing::error!(
                    category = failure.category(),
                    detail = %failure.detail(),
                    "Neo4j connectivity check failed"
                );
                failure.category()
            }
        };
        metrics::counter!("connectivity_probes_total", "outcome" => label).increment(1);
        metrics::histogram!("connectivity_probe_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        outcome
    }

    /// Runs one probe and returns the response model.
    pub async fn probe(&self) -> ConnectivityResult {
        ConnectivityResult::from(&self.check().await)
    }

    async fn acquire_and_verify(&self) -> ProbeOutcome {
        // No handle, nothing to release.
        let handle = self
            .bounded("connect", self.connector.connect(&self.settings))
            .await?;

        let checked = AssertUnwindSafe(
            self.bounded("verify_connectivity", handle.verify_connectivity()),
        )
        .catch_unwind()
        .await;

        if let Err(err) = handle.close().await {
            tracing::warn!(error = %err, "error while closing Neo4j handle");
        }

        // Released first, then the panic continues to the caller.
        checked.unwrap_or_else(|payload| panic::resume_unwind(payload))
    }

    async fn bounded<T, F>(&self, step: &'static str, fut: F) -> Result<T, ProbeFailure>
    where
        F: Future<Output = Result<T, ProbeFailure>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.unwrap_or_else(|_| {
                Err(ProbeFailure::ServiceUnavailable(format!(
                    "{step} timed out after {}ms",
                    limit.as_millis()
                )))
            }),
            None => fut.await,
        }
    }
}
