//! Graph path

use super::node::Node;
use super::relationship::Relationship;
use super::subgraph::Subgraph;

/// Alternating sequence of nodes and relationships
///
/// Always holds exactly one more node than relationships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
}

impl Path {
    /// Returns `None` unless `nodes.len() == relationships.len() + 1`
    #[must_use]
    pub fn new(nodes: Vec<Node>, relationships: Vec<Relationship>) -> Option<Self> {
        (nodes.len() == relationships.len() + 1).then_some(Self {
            nodes,
            relationships,
        })
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    #[must_use]
    pub fn start(&self) -> &Node {
        &self.nodes[0]
    }

    #[must_use]
    pub fn end(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Number of relationships
    #[must_use]
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    #[must_use]
    pub fn to_subgraph(&self) -> Subgraph {
        Subgraph::new(self.nodes.iter().cloned(), self.relationships.iter().cloned())
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.nodes[0])?;
        for (rel, node) in self.relationships.iter().zip(self.nodes.iter().skip(1)) {
            write!(f, "-[")?;
            if let Some(rel_type) = rel.rel_type() {
                write!(f, ":{rel_type}")?;
            }
            write!(f, "]-{node}")?;
        }
        Ok(())
    }
}
