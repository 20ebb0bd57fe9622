//! Response model shared by the prober and the HTTP layer.

use serde::{Deserialize, Serialize};

use crate::error::ProbeOutcome;

/// Message reported when the liveness check succeeds.
pub const SUCCESS_MESSAGE: &str = "Successfully connected to Neo4j database";

/// Result of a connectivity check.
///
/// Serializes as `{"status": <bool>, "message": <string>}`. Deserialization
/// is strict: a non-boolean `status` or a non-string `message` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityResult {
    /// True if the connection succeeded.
    pub status: bool,
    /// Describes the result.
    pub message: String,
}

impl ConnectivityResult {
    pub fn success() -> Self {
        Self {
            status: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
        }
    }
}

impl From<&ProbeOutcome> for ConnectivityResult {
    fn from(outcome: &ProbeOutcome) -> Self {
        match outcome {
            Ok(()) => Self::success(),
            Err(failure) => Self::failure(failure.message()),
        }
    }
}
