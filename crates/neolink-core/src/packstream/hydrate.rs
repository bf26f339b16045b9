//! Conversion between wire values and graph primitives

use std::collections::BTreeMap;

use crate::primitives::{CastProperty, Node, Path, PropertySet, Relationship, Value};

use super::error::PackError;
use super::unpacker::descend;
use super::value::PackValue;

pub(crate) const NODE: u8 = b'N';
pub(crate) const RELATIONSHIP: u8 = b'R';
pub(crate) const UNBOUND_RELATIONSHIP: u8 = b'r';
pub(crate) const PATH: u8 = b'P';

/// Turn a received value into a [`Value`], building graph entities from
/// their structures
///
/// # Errors
/// Returns an error for unknown signatures, structures with the wrong
/// field layout or nesting beyond [`MAX_DEPTH`](super::MAX_DEPTH).
pub fn hydrate(value: PackValue) -> Result<Value, PackError> {
    hydrate_at(value, 0)
}

fn hydrate_at(value: PackValue, depth: usize) -> Result<Value, PackError> {
    match value {
        PackValue::Null => Ok(Value::Null),
        PackValue::Boolean(b) => Ok(Value::Boolean(b)),
        PackValue::Integer(i) => Ok(Value::Integer(i)),
        PackValue::Float(f) => Ok(Value::Float(f)),
        PackValue::String(s) => Ok(Value::String(s)),
        PackValue::List(items) => {
            let depth = descend(depth)?;
            items
                .into_iter()
                .map(|item| hydrate_at(item, depth))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
        PackValue::Map(map) => {
            let depth = descend(depth)?;
            map.into_iter()
                .map(|(k, v)| hydrate_at(v, depth).map(|v| (k, v)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Value::Map)
        }
        PackValue::Structure { signature, fields } => {
            let depth = descend(depth)?;
            match signature {
                NODE => hydrate_node(fields, depth).map(Value::Node),
                RELATIONSHIP => hydrate_relationship(fields, depth).map(Value::Relationship),
                UNBOUND_RELATIONSHIP => {
                    hydrate_unbound_relationship(fields, depth).map(Value::Relationship)
                }
                PATH => hydrate_path(fields, depth).map(Value::Path),
                other => Err(PackError::UnknownStructure(other)),
            }
        }
    }
}

/// Turn a parameter into a wire value
///
/// Nodes and relationships are sent as their server id.
///
/// # Errors
/// Returns an error for unbound entities and paths.
pub fn dehydrate(value: &Value) -> Result<PackValue, PackError> {
    match value {
        Value::Null => Ok(PackValue::Null),
        Value::Boolean(b) => Ok(PackValue::Boolean(*b)),
        Value::Integer(i) => Ok(PackValue::Integer(*i)),
        Value::Float(f) => Ok(PackValue::Float(*f)),
        Value::String(s) => Ok(PackValue::String(s.clone())),
        Value::List(items) => items
            .iter()
            .map(dehydrate)
            .collect::<Result<Vec<_>, _>>()
            .map(PackValue::List),
        Value::Map(map) => map
            .iter()
            .map(|(k, v)| dehydrate(v).map(|v| (k.clone(), v)))
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(PackValue::Map),
        Value::Node(node) => node
            .remote_id()
            .map(PackValue::Integer)
            .ok_or(PackError::UnboundEntity("node")),
        Value::Relationship(rel) => rel
            .remote_id()
            .map(PackValue::Integer)
            .ok_or(PackError::UnboundEntity("relationship")),
        Value::Path(_) => Err(PackError::UnsupportedParameter("path")),
    }
}

fn malformed(what: &str) -> PackError {
    PackError::MalformedStructure(what.to_string())
}

fn take_fields<const N: usize>(
    fields: Vec<PackValue>,
    kind: &str,
) -> Result<[PackValue; N], PackError> {
    fields.try_into().map_err(|fields: Vec<PackValue>| {
        PackError::MalformedStructure(format!("{kind} expects {N} fields, got {}", fields.len()))
    })
}

fn integer(value: &PackValue, what: &str) -> Result<i64, PackError> {
    value.as_i64().ok_or_else(|| malformed(what))
}

fn string(value: PackValue, what: &str) -> Result<String, PackError> {
    match value {
        PackValue::String(s) => Ok(s),
        _ => Err(malformed(what)),
    }
}

fn properties(value: PackValue, depth: usize) -> Result<PropertySet, PackError> {
    let map = value.into_map().ok_or_else(|| malformed("properties must be a map"))?;
    let mut props = PropertySet::new();
    for (key, value) in map {
        let value = hydrate_at(value, depth)?;
        let cast = value
            .cast_property()
            .map_err(|e| PackError::MalformedStructure(format!("property {key}: {e}")))?;
        if let Some(cast) = cast {
            props.set(key, cast).map_err(|e| malformed(&e.to_string()))?;
        }
    }
    Ok(props)
}

fn hydrate_node(fields: Vec<PackValue>, depth: usize) -> Result<Node, PackError> {
    let [id, labels, props] = take_fields(fields, "node")?;
    let id = integer(&id, "node id")?;
    let labels = match labels {
        PackValue::List(items) => items
            .into_iter()
            .map(|label| string(label, "node label"))
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(malformed("node labels must be a list")),
    };
    Ok(Node::remote(id, labels, properties(props, depth)?))
}

fn hydrate_relationship(
    fields: Vec<PackValue>,
    depth: usize,
) -> Result<Relationship, PackError> {
    let [id, start, end, rel_type, props] = take_fields(fields, "relationship")?;
    Ok(Relationship::remote(
        integer(&id, "relationship id")?,
        Some((
            integer(&start, "relationship start")?,
            integer(&end, "relationship end")?,
        )),
        string(rel_type, "relationship type")?,
        properties(props, depth)?,
    ))
}

fn hydrate_unbound_relationship(
    fields: Vec<PackValue>,
    depth: usize,
) -> Result<Relationship, PackError> {
    let [id, rel_type, props] = take_fields(fields, "unbound relationship")?;
    Ok(Relationship::remote(
        integer(&id, "relationship id")?,
        None,
        string(rel_type, "relationship type")?,
        properties(props, depth)?,
    ))
}

/// Build a path from its distinct nodes, distinct relationships and the
/// `(relationship index, node index)` sequence
///
/// Relationship indexes are 1-based; a negative index means the
/// relationship is traversed against its direction.
fn hydrate_path(fields: Vec<PackValue>, depth: usize) -> Result<Path, PackError> {
    let [nodes, rels, sequence] = take_fields(fields, "path")?;
    let nodes = match hydrate_at(nodes, depth)? {
        Value::List(items) => items
            .into_iter()
            .map(|v| match v {
                Value::Node(node) => Ok(node),
                _ => Err(malformed("path nodes must be nodes")),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(malformed("path nodes must be a list")),
    };
    let rels = match hydrate_at(rels, depth)? {
        Value::List(items) => items
            .into_iter()
            .map(|v| match v {
                Value::Relationship(rel) => Ok(rel),
                _ => Err(malformed("path relationships must be relationships")),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(malformed("path relationships must be a list")),
    };
    let sequence = match sequence {
        PackValue::List(items) => items
            .iter()
            .map(|v| integer(v, "path sequence"))
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(malformed("path sequence must be a list")),
    };
    if sequence.len() % 2 != 0 {
        return Err(malformed("path sequence must have even length"));
    }

    let mut last = nodes.first().cloned().ok_or_else(|| malformed("path has no nodes"))?;
    let mut path_nodes = vec![last.clone()];
    let mut path_rels = Vec::with_capacity(sequence.len() / 2);

    for pair in sequence.chunks(2) {
        let (rel_index, node_index) = (pair[0], pair[1]);
        let next = usize::try_from(node_index)
            .ok()
            .and_then(|i| nodes.get(i))
            .cloned()
            .ok_or_else(|| malformed("path node index out of range"))?;
        let rel_position = usize::try_from(rel_index.unsigned_abs())
            .ok()
            .and_then(|i| i.checked_sub(1))
            .ok_or_else(|| malformed("path relationship index out of range"))?;
        let mut rel = rels
            .get(rel_position)
            .cloned()
            .ok_or_else(|| malformed("path relationship index out of range"))?;
        if rel_index > 0 {
            rel.set_endpoints(last.clone(), next.clone());
        } else {
            rel.set_endpoints(next.clone(), last.clone());
        }
        path_rels.push(rel);
        path_nodes.push(next.clone());
        last = next;
    }

    Path::new(path_nodes, path_rels).ok_or_else(|| malformed("path is not alternating"))
}
