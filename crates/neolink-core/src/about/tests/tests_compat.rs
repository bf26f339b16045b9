//! Tests for the compatibility matrix

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::about::{ServerVersion, VersionError, SUPPORTED_RUNTIMES, SUPPORTED_SERVER_VERSIONS};

/// Test the supported runtime list
#[test]
fn test_supported_runtimes() {
    assert_eq!(SUPPORTED_RUNTIMES, ["2.7", "3.3", "3.4"]);
}

/// Test the supported server version list
#[test]
fn test_supported_server_versions() {
    assert_eq!(
        SUPPORTED_SERVER_VERSIONS,
        [(1, 8), (1, 9), (2, 0), (2, 1), (2, 2), (2, 3)]
    );
}

/// Test that server version strings parse
#[rstest]
#[case("2.2.5", 2, 2, Some(5))]
#[case("1.9", 1, 9, None)]
#[case("Neo4j/3.0.0", 3, 0, Some(0))]
#[case("2.3.0-M02", 2, 3, Some(0))]
#[case(" 2.1.8 ", 2, 1, Some(8))]
fn test_parse(
    #[case] text: &str,
    #[case] major: u32,
    #[case] minor: u32,
    #[case] patch: Option<u32>,
) {
    let version = ServerVersion::parse(text).unwrap();
    assert_eq!(
        version,
        ServerVersion {
            major,
            minor,
            patch
        }
    );
}

/// Test that malformed server version strings are rejected
#[rstest]
#[case("")]
#[case("2")]
#[case("two.three")]
#[case("2.x.1")]
#[case("2.2.5.1")]
fn test_parse_rejects(#[case] text: &str) {
    assert_eq!(
        ServerVersion::parse(text),
        Err(VersionError::Invalid(text.to_string()))
    );
}

/// Test the supported check against the compatibility matrix
#[rstest]
#[case("1.8.3", true)]
#[case("1.9", true)]
#[case("2.0.4", true)]
#[case("2.1.8", true)]
#[case("2.2.10", true)]
#[case("2.3.3", true)]
#[case("1.7.2", false)]
#[case("3.0.0", false)]
fn test_is_supported(#[case] text: &str, #[case] supported: bool) {
    let version: ServerVersion = text.parse().unwrap();
    assert_eq!(version.is_supported(), supported);
}

/// Test that a displayed version parses back to itself
#[test]
fn test_display_round_trips() {
    assert_eq!(ServerVersion::parse("2.2.5").unwrap().to_string(), "2.2.5");
    assert_eq!(ServerVersion::parse("2.2").unwrap().to_string(), "2.2");
}
