//! Statement builders
//!
//! Each builder renders one Cypher statement plus its parameter map. Builders
//! use the `{name}` parameter syntax understood by protocol v1 servers.

use std::collections::{BTreeMap, BTreeSet};

use crate::primitives::{CastProperty, Node, PropertyError, PropertySet, PropertyValue, Value};

/// Named statement parameters
pub type Parameters = BTreeMap<String, Value>;

/// Anything that renders to a statement and its parameters
pub trait Task {
    fn statement(&self) -> String;

    fn parameters(&self) -> Parameters;

    fn to_task(&self) -> CypherTask {
        CypherTask {
            statement: self.statement(),
            parameters: self.parameters(),
        }
    }
}

/// A literal statement with parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CypherTask {
    statement: String,
    parameters: Parameters,
}

impl CypherTask {
    #[must_use]
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            parameters: Parameters::new(),
        }
    }

    /// Add a parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Parameters) {
        (self.statement, self.parameters)
    }

    /// `<CypherTask statement=".." parameters={..}>`
    #[must_use]
    pub fn repr(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(|(k, v)| format!("'{k}': {}", v.repr()))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "<CypherTask statement={:?} parameters={{{parameters}}}>",
            self.statement
        )
    }
}

impl Task for CypherTask {
    fn statement(&self) -> String {
        self.statement.clone()
    }

    fn parameters(&self) -> Parameters {
        self.parameters.clone()
    }
}

impl std::fmt::Display for CypherTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.statement)
    }
}

/// Quote a label, type or key with backticks unless it is a plain identifier
#[must_use]
pub fn escape_name(name: &str) -> String {
    let mut chars = name.chars();
    let plain = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

fn label_string<'a>(labels: impl IntoIterator<Item = &'a String>) -> String {
    labels
        .into_iter()
        .map(|label| format!(":{}", escape_name(label)))
        .collect()
}

/// `CREATE (a:Label {A})`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateNode {
    labels: BTreeSet<String>,
    properties: PropertySet,
    return_node: bool,
}

impl CreateNode {
    #[must_use]
    pub fn new<I, S>(labels: I, properties: PropertySet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().set(labels, properties)
    }

    /// Add labels and properties
    #[must_use]
    pub fn set<I, S>(mut self, labels: I, properties: PropertySet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self.properties.merge(properties);
        self
    }

    #[must_use]
    pub fn with_return(mut self) -> Self {
        self.return_node = true;
        self
    }

    #[must_use]
    pub fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    #[must_use]
    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }
}

impl Task for CreateNode {
    fn statement(&self) -> String {
        let mut statement = format!("CREATE (a{}", label_string(&self.labels));
        if !self.properties.is_empty() {
            statement.push_str(" {A}");
        }
        statement.push(')');
        if self.return_node {
            statement.push_str(" RETURN a");
        }
        statement
    }

    fn parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        if !self.properties.is_empty() {
            parameters.insert("A".to_string(), Value::from(&self.properties));
        }
        parameters
    }
}

/// `MERGE (a:Label {key:{A1}})`, optionally adding labels and properties
#[derive(Debug, Clone, PartialEq)]
pub struct MergeNode {
    primary_label: String,
    primary_key: Option<(String, PropertyValue)>,
    labels: BTreeSet<String>,
    properties: PropertySet,
    return_node: bool,
}

impl MergeNode {
    /// Merge on a label alone
    #[must_use]
    pub fn new(primary_label: impl Into<String>) -> Self {
        Self {
            primary_label: primary_label.into(),
            primary_key: None,
            labels: BTreeSet::new(),
            properties: PropertySet::new(),
            return_node: false,
        }
    }

    /// Merge on a label and one unique property
    ///
    /// # Errors
    /// Returns an error if the value cannot be stored as a property.
    pub fn on(
        primary_label: impl Into<String>,
        primary_key: impl Into<String>,
        primary_value: impl Into<PropertyValue>,
    ) -> Result<Self, PropertyError> {
        let value = primary_value
            .into()
            .cast_property()?
            .ok_or(PropertyError::InvalidType("null"))?;
        let mut merge = Self::new(primary_label);
        merge.primary_key = Some((primary_key.into(), value));
        Ok(merge)
    }

    /// Add labels and properties applied after the merge
    #[must_use]
    pub fn set<I, S>(mut self, labels: I, properties: PropertySet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self.properties.merge(properties);
        self
    }

    #[must_use]
    pub fn with_return(mut self) -> Self {
        self.return_node = true;
        self
    }

    #[must_use]
    pub fn primary_label(&self) -> &str {
        &self.primary_label
    }

    #[must_use]
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_ref().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn primary_value(&self) -> Option<&PropertyValue> {
        self.primary_key.as_ref().map(|(_, value)| value)
    }

    /// Primary label plus any added ones
    #[must_use]
    pub fn labels(&self) -> BTreeSet<String> {
        let mut labels = self.labels.clone();
        labels.insert(self.primary_label.clone());
        labels
    }

    fn extra_labels(&self) -> impl Iterator<Item = &String> {
        self.labels.iter().filter(|l| **l != self.primary_label)
    }
}

impl Task for MergeNode {
    fn statement(&self) -> String {
        let mut statement = format!("MERGE (a:{}", escape_name(&self.primary_label));
        if let Some((key, _)) = &self.primary_key {
            statement.push_str(&format!(" {{{}:{{A1}}}}", escape_name(key)));
        }
        statement.push(')');

        let extra = label_string(self.extra_labels());
        if !extra.is_empty() {
            statement.push_str(&format!(" SET a{extra}"));
        }
        if !self.properties.is_empty() {
            statement.push_str(" SET a={A}");
        }
        if self.return_node {
            statement.push_str(" RETURN a");
        }
        statement
    }

    fn parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        if let Some((_, value)) = &self.primary_key {
            parameters.insert("A1".to_string(), Value::from(value.clone()));
        }
        if !self.properties.is_empty() {
            let mut properties = self.properties.clone();
            if let Some((key, value)) = &self.primary_key {
                let mut primary = PropertySet::new();
                if primary.set(key.as_str(), value.clone()).is_ok() {
                    properties.merge(primary);
                }
            }
            parameters.insert("A".to_string(), Value::from(&properties));
        }
        parameters
    }
}

/// `CREATE (a)-[r:TYPE {R}]->(b)`, matching bound endpoints and creating the
/// others
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRelationship {
    start: Node,
    rel_type: String,
    end: Node,
    properties: PropertySet,
    return_all: bool,
}

impl CreateRelationship {
    #[must_use]
    pub fn new(start: Node, rel_type: impl Into<String>, end: Node, properties: PropertySet) -> Self {
        Self {
            start,
            rel_type: rel_type.into(),
            end,
            properties,
            return_all: false,
        }
    }

    #[must_use]
    pub fn with_return(mut self) -> Self {
        self.return_all = true;
        self
    }

    #[must_use]
    pub fn start(&self) -> &Node {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Node {
        &self.end
    }

    #[must_use]
    pub fn rel_type(&self) -> &str {
        &self.rel_type
    }
}

fn endpoint_clause(node: &Node, name: &str, param: &str) -> String {
    match node.remote_id() {
        Some(_) => format!("MATCH ({name}) WHERE id({name})={{{param}}}"),
        None => {
            let mut clause = format!("CREATE ({name}{}", label_string(node.labels()));
            if !node.properties().is_empty() {
                clause.push_str(&format!(" {{{param}}}"));
            }
            clause.push(')');
            clause
        }
    }
}

fn endpoint_parameter(node: &Node, param: &str, parameters: &mut Parameters) {
    match node.remote_id() {
        Some(id) => {
            parameters.insert(param.to_string(), Value::Integer(id));
        }
        None if !node.properties().is_empty() => {
            parameters.insert(param.to_string(), Value::from(node.properties()));
        }
        None => {}
    }
}

impl Task for CreateRelationship {
    fn statement(&self) -> String {
        let mut rel = format!("CREATE (a)-[r:{}", escape_name(&self.rel_type));
        if !self.properties.is_empty() {
            rel.push_str(" {R}");
        }
        rel.push_str("]->(b)");

        let mut statement = [
            endpoint_clause(&self.start, "a", "A"),
            endpoint_clause(&self.end, "b", "B"),
            rel,
        ]
        .join(" ");
        if self.return_all {
            statement.push_str(" RETURN a, r, b");
        }
        statement
    }

    fn parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        endpoint_parameter(&self.start, "A", &mut parameters);
        endpoint_parameter(&self.end, "B", &mut parameters);
        if !self.properties.is_empty() {
            parameters.insert("R".to_string(), Value::from(&self.properties));
        }
        parameters
    }
}
