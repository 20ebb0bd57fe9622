//! Neo4j adapter built on the `neo4rs` driver.

use async_trait::async_trait;
use neo4rs::{
    ConfigBuilder, Graph, Neo4jClientErrorKind, Neo4jErrorKind, Neo4jSecurityErrorKind,
};

use crate::connector::{GraphConnector, GraphHandle};
use crate::error::{ProbeFailure, ReleaseError};
use crate::settings::ConnectionSettings;

/// Liveness query. `neo4rs` exposes no bare handshake, so the check is one
/// trivial round-trip that touches no data.
const LIVENESS_QUERY: &str = "RETURN 1";

/// [`GraphConnector`] that opens a dedicated single-connection `neo4rs` graph per probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neo4jConnector;

impl Neo4jConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GraphConnector for Neo4jConnector {
    type Handle = Neo4jHandle;

    async fn connect(&self, settings: &ConnectionSettings) -> Result<Neo4jHandle, ProbeFailure> {
        let config = ConfigBuilder::default()
            .uri(settings.endpoint_uri())
            .user(settings.username())
            .password(settings.password())
            .db(settings.database_name())
            .max_connections(1)
            .build()
            .map_err(|e| classify(&e))?;

        let graph = Graph::connect(config).await.map_err(|e| classify(&e))?;
        tracing::debug!(uri = %settings.endpoint_uri(), "Neo4j driver created");
        Ok(Neo4jHandle { graph })
    }
}

/// Open `neo4rs` graph. Dropping the graph releases its pooled connection.
pub struct Neo4jHandle {
    graph: Graph,
}

#[async_trait]
impl GraphHandle for Neo4jHandle {
    /// Runs the liveness query in an explicit transaction.
    ///
    /// `Graph::run` retries retryable server errors with backoff; transactions
    /// are never retried, so this is exactly one attempt.
    async fn verify_connectivity(&self) -> Result<(), ProbeFailure> {
        let mut txn = self.graph.start_txn().await.map_err(|e| classify(&e))?;
        txn.run(neo4rs::query(LIVENESS_QUERY))
            .await
            .map_err(|e| classify(&e))?;
        txn.commit().await.map_err(|e| classify(&e))
    }

    async fn close(self) -> Result<(), ReleaseError> {
        drop(self.graph);
        tracing::debug!("Neo4j driver closed");
        Ok(())
    }
}

/// Maps a driver error onto a probe failure category.
pub fn classify(err: &neo4rs::Error) -> ProbeFailure {
    let detail = err.to_string();
    match err {
        neo4rs::Error::IOError { .. }
        | neo4rs::Error::ConnectionError
        | neo4rs::Error::InvalidDnsName(_) => ProbeFailure::ServiceUnavailable(detail),
        neo4rs::Error::Neo4j(server) => classify_kind(server.kind(), detail),
        _ => ProbeFailure::Unclassified(detail),
    }
}

/// Maps a server error kind, as `neo4rs` derives it from the status code.
fn classify_kind(kind: Neo4jErrorKind, detail: String) -> ProbeFailure {
    match kind {
        Neo4jErrorKind::Client(
            Neo4jClientErrorKind::SessionExpired
            | Neo4jClientErrorKind::Security(
                Neo4jSecurityErrorKind::AuthorizationExpired | Neo4jSecurityErrorKind::TokenExpired,
            ),
        ) => ProbeFailure::SessionExpired(detail),
        _ => ProbeFailure::Unclassified(detail),
    }
}
