//! Tests for DriverConfig

#![allow(clippy::expect_used)]

use serial_test::serial;

use crate::driver::{DriverConfig, DEFAULT_USER_AGENT, SECURE_ENV_VAR};

/// Test the defaults of a new driver config
#[test]
fn test_driver_config_new() {
    let config = DriverConfig::new("bolt://localhost:7687");
    assert_eq!(config.uri, "bolt://localhost:7687");
    assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    assert!(config.auth.is_none());
    assert!(!config.secure);
    assert!(!config.bench);
}

/// Test the driver config builder methods
#[test]
fn test_driver_config_builders() {
    let config = DriverConfig::new("bolt://db")
        .with_auth("neo4j", "secret")
        .with_user_agent("tests/1.0")
        .with_bench(true)
        .with_secure(true);
    let auth = config.auth.as_ref().expect("auth set");
    assert_eq!(auth.scheme, "basic");
    assert_eq!(auth.principal, "neo4j");
    assert_eq!(auth.credentials, "secret");
    assert_eq!(config.user_agent, "tests/1.0");
    assert!(config.bench);
    assert!(config.secure);
}

/// Test that debug output hides the password
#[test]
fn test_debug_output_hides_credentials() {
    let config = DriverConfig::new("bolt://db").with_auth("neo4j", "secret");
    let debug = format!("{config:?}");
    assert!(debug.contains("neo4j"));
    assert!(!debug.contains("secret"));
}

/// Test that the secure flag applies when the environment is silent
#[test]
#[serial]
fn test_secure_flag_used_when_env_unset() {
    std::env::remove_var(SECURE_ENV_VAR);
    assert!(DriverConfig::new("bolt://db").with_secure(true).resolve_secure());
    assert!(!DriverConfig::new("bolt://db").resolve_secure());
}

/// Test that the environment overrides the secure flag
#[test]
#[serial]
fn test_env_overrides_secure_flag() {
    std::env::set_var(SECURE_ENV_VAR, "1");
    assert!(DriverConfig::new("bolt://db").resolve_secure());

    std::env::set_var(SECURE_ENV_VAR, "false");
    assert!(!DriverConfig::new("bolt://db").with_secure(true).resolve_secure());

    std::env::remove_var(SECURE_ENV_VAR);
}
