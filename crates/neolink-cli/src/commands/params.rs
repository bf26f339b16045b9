//! `name=<json>` arguments

use anyhow::{anyhow, Context, Result};
use neolink_core::cypher::Parameters;
use neolink_core::primitives::{PropertySet, Value};

/// Split `name=<json>` into the name and its decoded value
///
/// A value that is not valid JSON is taken as a plain string.
///
/// # Errors
/// Returns an error if there is no `=` or the name is empty.
pub fn parse_assignment(arg: &str) -> Result<(String, Value)> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=JSON, got {arg:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("missing name in {arg:?}"));
    }
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(raw),
    };
    Ok((name.to_string(), value))
}

/// Statement parameters from `--param` arguments
///
/// # Errors
/// Returns an error for a malformed argument.
pub fn parse_parameters(args: &[String]) -> Result<Parameters> {
    args.iter().map(|arg| parse_assignment(arg)).collect()
}

/// Node properties from `--prop` arguments; a null value leaves the key unset
///
/// # Errors
/// Returns an error for a malformed argument or a value that cannot be stored
/// as a property.
pub fn parse_properties(args: &[String]) -> Result<PropertySet> {
    let mut properties = PropertySet::new();
    for arg in args {
        let (name, value) = parse_assignment(arg)?;
        properties
            .set(name.as_str(), value)
            .with_context(|| format!("invalid property {name:?}"))?;
    }
    Ok(properties)
}
