//! CLI commands

pub mod about;
pub mod create_node;
pub mod params;
pub mod run;

use anyhow::Result;
use neolink_core::cypher::CypherResource;
use neolink_core::driver::Driver;
use tracing::info;

use crate::types::ConnectionArgs;

/// Open a session for a command
///
/// # Errors
/// Returns an error if the URI is invalid or the server cannot be reached.
pub async fn connect(connection: &ConnectionArgs) -> Result<CypherResource> {
    info!("Connecting to {}...", connection.uri);
    let driver = Driver::new(connection.config())?;
    Ok(CypherResource::connect(&driver).await?)
}
