//! Settings loading against the real process environment.
//!
//! These tests mutate process-wide environment variables, so they run serially.

use connectivity::{ConfigError, ConnectionSettings, DEFAULT_DATABASE};
use serial_test::serial;

const VARS: [&str; 4] = [
    "NEO4J_URI",
    "NEO4J_USERNAME",
    "NEO4J_PASSWORD",
    "NEO4J_DATABASE",
];

fn set_env(pairs: &[(&str, &str)]) {
    // SAFETY: every test touching the environment is marked #[serial].
    unsafe {
        for name in VARS {
            std::env::remove_var(name);
        }
        for (name, value) in pairs {
            std::env::set_var(name, value);
        }
    }
}

#[test]
#[serial]
fn test_from_env_with_required_vars() {
    set_env(&[
        ("NEO4J_URI", "bolt://db.internal:7687"),
        ("NEO4J_USERNAME", "reader"),
        ("NEO4J_PASSWORD", "hunter2"),
    ]);

    let settings = ConnectionSettings::from_env().unwrap();
    assert_eq!(settings.endpoint_uri(), "bolt://db.internal:7687");
    assert_eq!(settings.username(), "reader");
    assert_eq!(settings.password(), "hunter2");
    assert_eq!(settings.database_name(), DEFAULT_DATABASE);
}

#[test]
#[serial]
fn test_from_env_with_database_override() {
    set_env(&[
        ("NEO4J_URI", "neo4j://localhost:7687"),
        ("NEO4J_USERNAME", "neo4j"),
        ("NEO4J_PASSWORD", "password"),
        ("NEO4J_DATABASE", "analytics"),
    ]);

    let settings = ConnectionSettings::from_env().unwrap();
    assert_eq!(settings.database_name(), "analytics");
}

#[test]
#[serial]
fn test_from_env_missing_password_fails() {
    set_env(&[
        ("NEO4J_URI", "bolt://localhost:7687"),
        ("NEO4J_USERNAME", "neo4j"),
    ]);

    let err = ConnectionSettings::from_env().unwrap_err();
    assert_eq!(err, ConfigError::MissingVar("NEO4J_PASSWORD"));
}

#[test]
#[serial]
fn test_from_env_nothing_set_fails_on_uri() {
    set_env(&[]);

    let err = ConnectionSettings::from_env().unwrap_err();
    assert_eq!(err, ConfigError::MissingVar("NEO4J_URI"));
}
