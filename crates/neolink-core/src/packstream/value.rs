//! Raw packstream values

use std::collections::BTreeMap;

/// A value as it appears on the wire, before hydration
#[derive(Debug, Clone, PartialEq)]
pub enum PackValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<PackValue>),
    Map(BTreeMap<String, PackValue>),
    Structure { signature: u8, fields: Vec<PackValue> },
}

impl PackValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_map(self) -> Option<BTreeMap<String, PackValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for PackValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PackValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PackValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<BTreeMap<String, PackValue>> for PackValue {
    fn from(value: BTreeMap<String, PackValue>) -> Self {
        Self::Map(value)
    }
}
