use thiserror::Error;

/// Errors raised while loading connection settings at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// The category a failed probe falls into.
///
/// Each variant carries the underlying driver detail for logging. The
/// client-facing text is fixed per category, see [`ProbeFailure::message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    /// The server could not be reached: refused connection, DNS, TLS, IO or timeout.
    #[error("Database service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The session or its credentials expired during the handshake.
    #[error("Database session expired: {0}")]
    SessionExpired(String),

    /// Anything else, including bad credentials and protocol errors.
    #[error("Connection failed: {0}")]
    Unclassified(String),
}

impl ProbeFailure {
    /// Human-readable message reported in a [`crate::ConnectivityResult`].
    pub fn message(&self) -> String {
        match self {
            ProbeFailure::ServiceUnavailable(_) => "Database service is unavailable".to_string(),
            ProbeFailure::SessionExpired(_) => "Database session expired".to_string(),
            ProbeFailure::Unclassified(detail) => format!("Connection failed: {detail}"),
        }
    }

    /// Stable label used for metrics and structured logs.
    pub fn category(&self) -> &'static str {
        match self {
            ProbeFailure::ServiceUnavailable(_) => "service_unavailable",
            ProbeFailure::SessionExpired(_) => "session_expired",
            ProbeFailure::Unclassified(_) => "unclassified",
        }
    }

    /// The raw detail the failure was classified from.
    pub fn detail(&self) -> &str {
        match self {
            ProbeFailure::ServiceUnavailable(detail)
            | ProbeFailure::SessionExpired(detail)
            | ProbeFailure::Unclassified(detail) => detail,
        }
    }
}

/// Error raised while releasing a graph handle.
///
/// Release errors are logged by the prober and never replace the probe outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to release graph handle: {0}")]
pub struct ReleaseError(pub String);

/// Outcome of a single probe: `Ok(())` when the server answered.
pub type ProbeOutcome = std::result::Result<(), ProbeFailure>;
