//! Server configuration loaded from environment variables.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while reading the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerConfigError {
    /// A variable is set but its value is unusable.
    #[error("Invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `NEO4J_PROBE_TIMEOUT_SECS` — per-step probe timeout, at least 1 (default: none)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub probe_timeout: Option<Duration>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] over an arbitrary lookup.
    ///
    /// Unset variables take their defaults; set but unparsable ones are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|e| ServerConfigError::InvalidVar {
                name: "PORT",
                reason: format!("{e}"),
            })?,
            None => defaults.port,
        };
        let probe_timeout = match lookup("NEO4J_PROBE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| ServerConfigError::InvalidVar {
                    name: "NEO4J_PROBE_TIMEOUT_SECS",
                    reason: format!("{e}"),
                })?;
                if secs == 0 {
                    return Err(ServerConfigError::InvalidVar {
                        name: "NEO4J_PROBE_TIMEOUT_SECS",
                        reason: "must be at least 1 second".to_string(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => defaults.probe_timeout,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            probe_timeout,
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: "info".to_string(),
            probe_timeout: None,
        }
    }
}
