#![allow(clippy::unwrap_used)]

mod tests_records;
mod tests_transaction;

use std::collections::BTreeMap;

use crate::primitives::{PropertySet, PropertyValue, Value};

pub(super) fn props(pairs: &[(&str, PropertyValue)]) -> PropertySet {
    PropertySet::from_pairs(pairs.iter().cloned()).unwrap()
}

pub(super) fn map_value(pairs: Vec<(&str, Value)>) -> Value {
    Value::Map(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}
