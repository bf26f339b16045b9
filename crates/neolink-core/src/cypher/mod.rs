//! Cypher module: statement builders, execution and transactions
//!
//! A [`CypherResource`] wraps one driver session. Statements can be given as
//! text or built with [`CreateNode`], [`MergeNode`], [`CreateRelationship`]
//! and [`DeleteStatement`].

mod delete;
mod error;
mod records;
mod resource;
mod task;
mod transaction;

pub use delete::{Deletable, DeleteStatement};
pub use error::CypherError;
pub use records::RecordList;
pub use resource::CypherResource;
pub use task::{escape_name, CreateNode, CreateRelationship, CypherTask, MergeNode, Parameters, Task};
pub use transaction::CypherTransaction;

#[cfg(test)]
mod tests;
