//! neolink-core: a Neo4j client toolkit
//!
//! - [`primitives`]: nodes, relationships, paths, subgraphs and property
//!   values
//! - [`packstream`]: the binary value encoding used on the wire
//! - [`driver`]: a Bolt protocol v1 client
//! - [`cypher`]: statement builders, execution and transactions
//! - [`about`]: release facts and the documentation index

pub mod about;
pub mod cypher;
pub mod driver;
pub mod packstream;
pub mod primitives;

#[cfg(test)]
pub(crate) mod testing;
