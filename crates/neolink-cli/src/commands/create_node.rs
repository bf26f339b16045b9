//! Create-node command

use anyhow::Result;
use neolink_core::cypher::CreateNode;
use tracing::info;

use super::{connect, params::parse_properties, run::render};
use crate::types::ConnectionArgs;

/// Build the statement for the given labels and `name=<json>` properties
///
/// # Errors
/// Returns an error for a malformed or unstorable property.
pub fn build(labels: &[String], props: &[String]) -> Result<CreateNode> {
    let properties = parse_properties(props)?;
    Ok(CreateNode::new(labels.iter().cloned(), properties).with_return())
}

/// Run the create-node command
///
/// # Errors
/// Returns an error if a property is invalid, the connection fails or the
/// server rejects the statement.
pub async fn run(
    labels: &[String],
    props: &[String],
    json: bool,
    connection: &ConnectionArgs,
) -> Result<()> {
    let task = build(labels, props)?;
    let mut cypher = connect(connection).await?;

    info!("Creating node...");
    let records = cypher.execute_task(&task).await?;
    print!("{}", render(&records, json)?);

    cypher.close().await?;
    Ok(())
}
