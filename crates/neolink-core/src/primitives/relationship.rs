//! Graph relationship

use std::hash::{Hash, Hasher};

use super::identity::Identity;
use super::node::Node;
use super::property::{CastProperty, PropertyError, PropertySet, PropertyValue};

/// A relationship between two nodes
///
/// Both endpoints and the type are optional so that a relationship can be
/// described piecemeal before it is sent to the server.
#[derive(Debug, Clone)]
pub struct Relationship {
    identity: Identity,
    start: Option<Node>,
    rel_type: Option<String>,
    end: Option<Node>,
    properties: PropertySet,
}

impl Relationship {
    /// Typed relationship from `start` to `end`
    pub fn new(start: Node, rel_type: impl Into<String>, end: Node) -> Self {
        Self {
            identity: Identity::fresh(),
            start: Some(start),
            rel_type: Some(rel_type.into()),
            end: Some(end),
            properties: PropertySet::new(),
        }
    }

    /// Untyped relationship between two nodes
    #[must_use]
    pub fn between(start: Node, end: Node) -> Self {
        Self {
            identity: Identity::fresh(),
            start: Some(start),
            rel_type: None,
            end: Some(end),
            properties: PropertySet::new(),
        }
    }

    /// Relationship with a type but no endpoints
    pub fn typed(rel_type: impl Into<String>) -> Self {
        Self {
            identity: Identity::fresh(),
            start: None,
            rel_type: Some(rel_type.into()),
            end: None,
            properties: PropertySet::new(),
        }
    }

    /// Relationship with neither endpoints nor type
    #[must_use]
    pub fn bare() -> Self {
        Self {
            identity: Identity::fresh(),
            start: None,
            rel_type: None,
            end: None,
            properties: PropertySet::new(),
        }
    }

    /// Relationship as returned by the server
    ///
    /// Endpoints are known only by id; `None` for the unbound relationships
    /// found inside paths.
    pub fn remote(
        id: i64,
        endpoints: Option<(i64, i64)>,
        rel_type: impl Into<String>,
        properties: PropertySet,
    ) -> Self {
        let (start, end) = match endpoints {
            Some((start, end)) => (
                Some(Node::remote(start, std::iter::empty::<String>(), PropertySet::new())),
                Some(Node::remote(end, std::iter::empty::<String>(), PropertySet::new())),
            ),
            None => (None, None),
        };
        Self {
            identity: Identity::Remote(id),
            start,
            rel_type: Some(rel_type.into()),
            end,
            properties,
        }
    }

    #[must_use]
    pub fn with_properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    pub fn bind(&mut self, id: i64) {
        self.identity = Identity::Remote(id);
    }

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

    /// Number of relationships walked; always one
    #[must_use]
    pub fn length(&self) -> usize {
        1
    }

    #[must_use]
    pub fn start(&self) -> Option<&Node> {
        self.start.as_ref()
    }

    #[must_use]
    pub fn end(&self) -> Option<&Node> {
        self.end.as_ref()
    }

    pub(crate) fn set_endpoints(&mut self, start: Node, end: Node) {
        self.start = Some(start);
        self.end = Some(end);
    }

    /// Endpoint nodes that are present
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.start.iter().chain(self.end.iter())
    }

    #[must_use]
    pub fn rel_type(&self) -> Option<&str> {
        self.rel_type.as_deref()
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

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Relationship {}

impl Hash for Relationship {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.start {
            Some(node) => write!(f, "{node}")?,
            None => write!(f, "()")?,
        }
        write!(f, "-[")?;
        if let Some(id) = self.remote_id() {
            write!(f, "_{id}")?;
        }
        if let Some(rel_type) = &self.rel_type {
            write!(f, ":{rel_type}")?;
        }
        if !self.properties.is_empty() {
            write!(f, " {}", self.properties)?;
        }
        write!(f, "]->")?;
        match &self.end {
            Some(node) => write!(f, "{node}"),
            None => write!(f, "()"),
        }
    }
}
