//! Primitives module: Nodes, relationships and the values they carry
//!
//! Everything here is plain data. Entities compare by identity, property
//! values are restricted to what the server can store, and subgraphs
//! support set algebra.

mod identity;
mod node;
mod path;
mod property;
mod relationship;
mod subgraph;
mod value;

pub use identity::Identity;
pub use node::Node;
pub use path::Path;
pub use property::{CastProperty, PropertyError, PropertySet, PropertyValue};
pub use relationship::Relationship;
pub use subgraph::Subgraph;
pub use value::Value;

#[cfg(test)]
mod tests;
