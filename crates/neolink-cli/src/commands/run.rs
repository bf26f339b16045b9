//! Run command: execute a statement and print its records

use std::collections::BTreeMap;

use anyhow::Result;
use neolink_core::cypher::RecordList;
use neolink_core::primitives::Value;
use tracing::info;

use super::{connect, params::parse_parameters};
use crate::types::ConnectionArgs;

/// Run the run command
///
/// # Errors
/// Returns an error if a parameter is malformed, the connection fails or the
/// server rejects the statement.
pub async fn run(
    statement: &str,
    params: &[String],
    json: bool,
    connection: &ConnectionArgs,
) -> Result<()> {
    let parameters = parse_parameters(params)?;
    let mut cypher = connect(connection).await?;

    info!("Executing statement...");
    let records = cypher.execute(statement, &parameters).await?;
    print!("{}", render(&records, json)?);
    info!("{} records returned", records.len());

    cypher.close().await?;
    Ok(())
}

/// Format records as a table, or as a JSON array of objects
///
/// # Errors
/// Returns an error if JSON serialization fails.
pub fn render(records: &RecordList, json: bool) -> Result<String> {
    if !json {
        return Ok(records.to_string());
    }
    let rows: Vec<BTreeMap<&str, &Value>> = records
        .iter()
        .map(|record| {
            record
                .fields()
                .iter()
                .map(String::as_str)
                .zip(record.values())
                .collect()
        })
        .collect();
    let mut out = serde_json::to_string_pretty(&rows)?;
    out.push('\n');
    Ok(out)
}
