//! Dynamic values exchanged with the server

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::node::Node;
use super::path::Path;
use super::property::{PropertySet, PropertyValue};
use super::relationship::Relationship;

/// Any value that can appear as a statement parameter or in a result
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Node(Node),
    Relationship(Relationship),
    Path(Path),
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

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
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Self::Relationship(rel) => Some(rel),
            _ => None,
        }
    }

    /// Short, quoted rendering used in record and table output
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::String(s) => format!("'{s}'"),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item.repr())?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {}", value.repr())?;
                }
                write!(f, "}}")
            }
            Self::Node(node) => write!(f, "{node}"),
            Self::Relationship(rel) => write!(f, "{rel}"),
            Self::Path(path) => write!(f, "{path}"),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    i8 => Integer,
    i16 => Integer,
    i32 => Integer,
    i64 => Integer,
    u8 => Integer,
    u16 => Integer,
    u32 => Integer,
    f32 => Float,
    f64 => Float,
    String => String,
    &str => String,
    Node => Node,
    Relationship => Relationship,
    Path => Path,
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

impl From<PropertyValue> for Value {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Boolean(b) => Self::Boolean(b),
            PropertyValue::Integer(i) => Self::Integer(i),
            PropertyValue::Float(f) => Self::Float(f),
            PropertyValue::String(s) => Self::String(s),
            PropertyValue::List(items) => Self::List(items.into_iter().map(Self::from).collect()),
        }
    }
}

impl From<&PropertySet> for Value {
    fn from(properties: &PropertySet) -> Self {
        Self::Map(
            properties
                .iter()
                .map(|(k, v)| (k.clone(), Self::from(v.clone())))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Node(node) => serialize_node(node, serializer),
            Self::Relationship(rel) => serialize_relationship(rel, serializer),
            Self::Path(path) => {
                let nodes: Vec<Value> = path.nodes().iter().cloned().map(Self::Node).collect();
                let rels: Vec<Value> = path
                    .relationships()
                    .iter()
                    .cloned()
                    .map(Self::Relationship)
                    .collect();
                let mut out = serializer.serialize_map(Some(2))?;
                out.serialize_entry("nodes", &nodes)?;
                out.serialize_entry("relationships", &rels)?;
                out.end()
            }
        }
    }
}

fn serialize_node<S: Serializer>(node: &Node, serializer: S) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(3))?;
    out.serialize_entry("id", &node.remote_id())?;
    out.serialize_entry("labels", node.labels())?;
    out.serialize_entry("properties", node.properties())?;
    out.end()
}

fn serialize_relationship<S: Serializer>(
    rel: &Relationship,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(5))?;
    out.serialize_entry("id", &rel.remote_id())?;
    out.serialize_entry("type", &rel.rel_type())?;
    out.serialize_entry("start", &rel.start().and_then(Node::remote_id))?;
    out.serialize_entry("end", &rel.end().and_then(Node::remote_id))?;
    out.serialize_entry("properties", rel.properties())?;
    out.end()
}
