//! Traits for acquiring and releasing graph database handles.

use async_trait::async_trait;

use crate::error::{ProbeFailure, ReleaseError};
use crate::settings::ConnectionSettings;

/// Opens short-lived handles to a graph database.
#[async_trait]
pub trait GraphConnector: Send + Sync {
    /// The handle type produced by [`GraphConnector::connect`].
    type Handle: GraphHandle;

    /// Acquires a handle using the given settings.
    ///
    /// Failures must already be classified into a [`ProbeFailure`].
    async fn connect(&self, settings: &ConnectionSettings) -> Result<Self::Handle, ProbeFailure>;
}

/// An open handle to a graph database that must be released after use.
#[async_trait]
pub trait GraphHandle: Send + Sync {
    /// Performs one round-trip confirming the server accepts connections.
    async fn verify_connectivity(&self) -> Result<(), ProbeFailure>;

    /// Releases the handle. Consumes it, so release happens at most once.
    async fn close(self) -> Result<(), ReleaseError>;
}
