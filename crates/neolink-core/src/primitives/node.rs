//! Graph node

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use super::identity::Identity;
use super::property::{CastProperty, PropertyError, PropertySet, PropertyValue};

/// A labelled node carrying a set of properties
///
/// Equality and hashing use [`Identity`] only, so two nodes with identical
/// content are distinct unless they refer to the same server-side node.
#[derive(Debug, Clone)]
pub struct Node {
    identity: Identity,
    labels: BTreeSet<String>,
    properties: PropertySet,
}

impl Node {
    /// Create an unbound node
    pub fn new<I, S>(labels: I, properties: PropertySet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identity: Identity::fresh(),
            labels: labels.into_iter().map(Into::into).collect(),
            properties,
        }
    }

    /// Node as returned by the server
    pub fn remote<I, S>(id: i64, labels: I, properties: PropertySet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identity: Identity::Remote(id),
            labels: labels.into_iter().map(Into::into).collect(),
            properties,
        }
    }

    /// Attach this node to a server-side id
    pub fn bind(&mut self, id: i64) {
        self.identity = Identity::Remote(id);
    }

    /// Detach from the server, giving the node a fresh local identity
    pub fn unbind(&mut self) {
        self.identity = Identity::fresh();
    }

    #[must_use]
    pub fn identity(&self) -> Identity {
        self.identity
    }

    #[must_use]
    pub fn remote_id(&self) -> Option<i64> {
        self.identity.remote_id()
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.identity.is_bound()
    }

    /// Number of relationships walked; always zero for a lone node
    #[must_use]
    pub fn length(&self) -> usize {
        0
    }

    #[must_use]
    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn add_label(&mut self, label: impl Into<String>) {
        self.labels.insert(label.into());
    }

    pub fn remove_label(&mut self, label: &str) -> bool {
        self.labels.remove(label)
    }

    #[must_use]
    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertySet {
        &mut self.properties
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// # Errors
    /// Returns an error if the value cannot be stored as a property.
    pub fn set<V: CastProperty>(
        &mut self,
        key: impl Into<String>,
        value: V,
    ) -> Result<(), PropertyError> {
        self.properties.set(key, value)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>(), PropertySet::new())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        if let Some(id) = self.remote_id() {
            write!(f, "_{id}")?;
        }
        for label in &self.labels {
            write!(f, ":{label}")?;
        }
        if !self.properties.is_empty() {
            write!(f, " {}", self.properties)?;
        }
        write!(f, ")")
    }
}
