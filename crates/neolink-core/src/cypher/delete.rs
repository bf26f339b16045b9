//! Delete statements for bound entities

use std::collections::HashSet;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::driver::Session;
use crate::primitives::{Node, Path, Relationship, Subgraph, Value};

use super::error::CypherError;
use super::records::RecordList;
use super::task::{Parameters, Task};

/// Something that can be added to a [`DeleteStatement`]
pub trait Deletable {
    /// Add `self` to `statement`
    ///
    /// # Errors
    /// Returns [`CypherError::UnboundEntity`] if any entity has no server id.
    /// Nothing is added in that case.
    fn add_to(&self, statement: &mut DeleteStatement) -> Result<(), CypherError>;
}

/// Deletes a set of bound nodes and relationships in one statement
///
/// Relationships added as part of a subgraph or path are deleted before the
/// nodes they connect.
#[derive(Debug, Clone, Default)]
pub struct DeleteStatement {
    matches: Vec<String>,
    names: Vec<String>,
    parameters: Parameters,
    nodes: HashSet<Node>,
    relationships: HashSet<Relationship>,
}

impl DeleteStatement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, relationship, path or subgraph
    ///
    /// # Errors
    /// Returns [`CypherError::UnboundEntity`] if any entity has no server id.
    pub fn delete<T: Deletable + ?Sized>(&mut self, item: &T) -> Result<(), CypherError> {
        item.add_to(self)
    }

    #[must_use]
    pub fn contains_node(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    #[must_use]
    pub fn contains_relationship(&self, rel: &Relationship) -> bool {
        self.relationships.contains(rel)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Run the statement, doing nothing if it is empty
    ///
    /// # Errors
    /// Returns an error if the server rejects the statement.
    pub async fn execute<S>(&self, session: &mut Session<S>) -> Result<RecordList, CypherError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        if self.is_empty() {
            return Ok(RecordList::default());
        }
        let result = session.run(&self.statement(), &self.parameters).await?;
        Ok(RecordList::from(result))
    }

    fn next_name(&self) -> String {
        format!("_{}", self.names.len())
    }

    fn push_node(&mut self, node: &Node, id: i64) {
        if self.nodes.contains(node) {
            return;
        }
        let name = self.next_name();
        self.matches
            .push(format!("MATCH ({name}) WHERE id({name})={{{name}}}"));
        self.parameters.insert(name.clone(), Value::Integer(id));
        self.names.push(name);
        self.nodes.insert(node.clone());
    }

    fn push_relationship(&mut self, rel: &Relationship, id: i64) {
        if self.relationships.contains(rel) {
            return;
        }
        let name = self.next_name();
        self.matches
            .push(format!("MATCH ()-[{name}]->() WHERE id({name})={{{name}}}"));
        self.parameters.insert(name.clone(), Value::Integer(id));
        self.names.push(name);
        self.relationships.insert(rel.clone());
    }

    fn push_all(&mut self, nodes: &[&Node], rels: &[&Relationship]) -> Result<(), CypherError> {
        let rel_ids = rels
            .iter()
            .map(|rel| bound_id(rel.remote_id(), rel))
            .collect::<Result<Vec<_>, _>>()?;
        let node_ids = nodes
            .iter()
            .map(|node| bound_id(node.remote_id(), node))
            .collect::<Result<Vec<_>, _>>()?;

        for (rel, id) in rels.iter().zip(rel_ids) {
            self.push_relationship(rel, id);
        }
        for (node, id) in nodes.iter().zip(node_ids) {
            self.push_node(node, id);
        }
        Ok(())
    }
}

fn bound_id(id: Option<i64>, entity: &impl std::fmt::Display) -> Result<i64, CypherError> {
    id.ok_or_else(|| CypherError::UnboundEntity(entity.to_string()))
}

impl Task for DeleteStatement {
    fn statement(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("{}\nDELETE {}", self.matches.join("\n"), self.names.join(", "))
    }

    fn parameters(&self) -> Parameters {
        self.parameters.clone()
    }
}

impl std::fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.statement())
    }
}

impl Deletable for Node {
    fn add_to(&self, statement: &mut DeleteStatement) -> Result<(), CypherError> {
        statement.push_all(&[self], &[])
    }
}

impl Deletable for Relationship {
    fn add_to(&self, statement: &mut DeleteStatement) -> Result<(), CypherError> {
        statement.push_all(&[], &[self])
    }
}

impl Deletable for Path {
    fn add_to(&self, statement: &mut DeleteStatement) -> Result<(), CypherError> {
        let nodes: Vec<&Node> = self.nodes().iter().collect();
        let rels: Vec<&Relationship> = self.relationships().iter().collect();
        statement.push_all(&nodes, &rels)
    }
}

impl Deletable for Subgraph {
    fn add_to(&self, statement: &mut DeleteStatement) -> Result<(), CypherError> {
        let mut nodes: Vec<&Node> = self.nodes().iter().collect();
        let mut rels: Vec<&Relationship> = self.relationships().iter().collect();
        nodes.sort_by_key(|node| node.remote_id());
        rels.sort_by_key(|rel| rel.remote_id());
        statement.push_all(&nodes, &rels)
    }
}
