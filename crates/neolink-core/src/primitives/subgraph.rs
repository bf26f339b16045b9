//! Subgraph: an arbitrary collection of nodes and relationships

use std::collections::{BTreeSet, HashSet};
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, Sub};

use super::node::Node;
use super::relationship::Relationship;

/// Set of nodes and relationships with set algebra
///
/// A subgraph is considered empty when it holds no relationships, even if
/// it holds nodes.
#[derive(Debug, Clone, Default)]
pub struct Subgraph {
    nodes: HashSet<Node>,
    relationships: HashSet<Relationship>,
}

impl Subgraph {
    pub fn new<N, R>(nodes: N, relationships: R) -> Self
    where
        N: IntoIterator<Item = Node>,
        R: IntoIterator<Item = Relationship>,
    {
        Self {
            nodes: nodes.into_iter().collect(),
            relationships: relationships.into_iter().collect(),
        }
    }

    /// Relationships plus every endpoint they reference
    fn closed(nodes: HashSet<Node>, relationships: HashSet<Relationship>) -> Self {
        let mut nodes = nodes;
        for rel in &relationships {
            nodes.extend(rel.nodes().cloned());
        }
        Self {
            nodes,
            relationships,
        }
    }

    #[must_use]
    pub fn nodes(&self) -> &HashSet<Node> {
        &self.nodes
    }

    #[must_use]
    pub fn relationships(&self) -> &HashSet<Relationship> {
        &self.relationships
    }

    /// Number of nodes
    #[must_use]
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Number of relationships
    #[must_use]
    pub fn size(&self) -> usize {
        self.relationships.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
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
    pub fn property_keys(&self) -> BTreeSet<String> {
        let node_keys = self.nodes.iter().flat_map(|n| n.properties().keys());
        let rel_keys = self.relationships.iter().flat_map(|r| r.properties().keys());
        node_keys.chain(rel_keys).cloned().collect()
    }

    #[must_use]
    pub fn labels(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .flat_map(|n| n.labels().iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn types(&self) -> BTreeSet<String> {
        self.relationships
            .iter()
            .filter_map(|r| r.rel_type().map(str::to_string))
            .collect()
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            nodes: self.nodes.union(&other.nodes).cloned().collect(),
            relationships: self
                .relationships
                .union(&other.relationships)
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            nodes: self.nodes.intersection(&other.nodes).cloned().collect(),
            relationships: self
                .relationships
                .intersection(&other.relationships)
                .cloned()
                .collect(),
        }
    }

    /// Members of `self` not in `other`, keeping endpoints of the remaining
    /// relationships
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let relationships = self
            .relationships
            .difference(&other.relationships)
            .cloned()
            .collect();
        let nodes = self.nodes.difference(&other.nodes).cloned().collect();
        Self::closed(nodes, relationships)
    }

    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let relationships = self
            .relationships
            .symmetric_difference(&other.relationships)
            .cloned()
            .collect();
        let nodes = self
            .nodes
            .symmetric_difference(&other.nodes)
            .cloned()
            .collect();
        Self::closed(nodes, relationships)
    }
}

impl PartialEq for Subgraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.relationships == other.relationships
    }
}

impl Eq for Subgraph {}

impl Hash for Subgraph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // XOR of member hashes keeps the result independent of set order
        let mut value = 0u64;
        for node in &self.nodes {
            value ^= member_hash(node);
        }
        for rel in &self.relationships {
            value ^= member_hash(rel);
        }
        value.hash(state);
    }
}

fn member_hash<T: Hash>(member: &T) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    member.hash(&mut hasher);
    hasher.finish()
}

impl From<Node> for Subgraph {
    fn from(node: Node) -> Self {
        Self::new([node], [])
    }
}

impl From<&Node> for Subgraph {
    fn from(node: &Node) -> Self {
        Self::from(node.clone())
    }
}

impl From<Relationship> for Subgraph {
    fn from(rel: Relationship) -> Self {
        let nodes: Vec<Node> = rel.nodes().cloned().collect();
        Self::new(nodes, [rel])
    }
}

impl From<&Relationship> for Subgraph {
    fn from(rel: &Relationship) -> Self {
        Self::from(rel.clone())
    }
}

impl BitOr for &Subgraph {
    type Output = Subgraph;

    fn bitor(self, rhs: Self) -> Subgraph {
        self.union(rhs)
    }
}

impl BitAnd for &Subgraph {
    type Output = Subgraph;

    fn bitand(self, rhs: Self) -> Subgraph {
        self.intersection(rhs)
    }
}

impl Sub for &Subgraph {
    type Output = Subgraph;

    fn sub(self, rhs: Self) -> Subgraph {
        self.difference(rhs)
    }
}

impl BitXor for &Subgraph {
    type Output = Subgraph;

    fn bitxor(self, rhs: Self) -> Subgraph {
        self.symmetric_difference(rhs)
    }
}

impl std::fmt::Display for Subgraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Subgraph order={} size={}>", self.order(), self.size())
    }
}
