//! Neo4j connectivity verification.
//!
//! Loads connection settings once at startup, opens a short-lived handle per
//! probe, runs a single liveness round-trip and classifies any failure as
//! service-unavailable, session-expired or unclassified. The handle is always
//! released when one was acquired.

pub mod connector;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod neo4j;
pub mod prober;
pub mod result;
pub mod settings;

pub use connector::{GraphConnector, GraphHandle};
pub use error::{ConfigError, ProbeFailure, ProbeOutcome, ReleaseError};
#[cfg(any(test, feature = "test-util"))]
pub use memory::{StubBehavior, StubConnector};
pub use neo4j::{Neo4jConnector, Neo4jHandle};
pub use prober::Prober;
pub use result::{ConnectivityResult, SUCCESS_MESSAGE};
pub use settings::{ConnectionSettings, DEFAULT_DATABASE};
