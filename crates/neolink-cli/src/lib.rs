//! neolink-cli library
//!
//! Exposes the command line types and command implementations for testing.

#[doc(hidden)]
pub mod commands;

pub mod types;
pub use types::{Cli, Commands, ConnectionArgs};

use tracing_subscriber::EnvFilter;

/// Log filter for the chosen verbosity
#[must_use]
pub fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}
