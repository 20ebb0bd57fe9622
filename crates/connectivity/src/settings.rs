//! Neo4j connection settings loaded from environment variables.

use std::fmt;

use crate::error::ConfigError;

pub const NEO4J_URI: &str = "NEO4J_URI";
pub const NEO4J_USERNAME: &str = "NEO4J_USERNAME";
pub const NEO4J_PASSWORD: &str = "NEO4J_PASSWORD";
pub const NEO4J_DATABASE: &str = "NEO4J_DATABASE";

/// Database selected when `NEO4J_DATABASE` is not set.
pub const DEFAULT_DATABASE: &str = "neo4j";

/// Immutable connection settings, built once at startup.
///
/// Reads from environment variables:
/// - `NEO4J_URI` — server URI, e.g. `bolt://localhost:7687` (required)
/// - `NEO4J_USERNAME` — user to authenticate as (required)
/// - `NEO4J_PASSWORD` — password for that user (required)
/// - `NEO4J_DATABASE` — database name (default: `"neo4j"`)
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    endpoint_uri: String,
    username: String,
    password: String,
    database_name: String,
}

impl ConnectionSettings {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    ///
    /// Required variables that are absent or empty fail with
    /// [`ConfigError::MissingVar`]; an empty database name falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let settings = Self {
            endpoint_uri: required(NEO4J_URI)?,
            username: required(NEO4J_USERNAME)?,
            password: required(NEO4J_PASSWORD)?,
            database_name: lookup(NEO4J_DATABASE)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        };

        tracing::info!(
            uri = %settings.endpoint_uri,
            database = %settings.database_name,
            "Neo4j settings loaded from environment variables"
        );
        Ok(settings)
    }

    pub fn endpoint_uri(&self) -> &str {
        &self.endpoint_uri
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("endpoint_uri", &self.endpoint_uri)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database_name", &self.database_name)
            .finish()
    }
}
