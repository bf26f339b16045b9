//! Result records

use std::sync::Arc;

use crate::primitives::Value;

/// One row of a result, with field names shared across the result
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    /// Values beyond the number of fields are dropped and missing values
    /// read as null
    #[must_use]
    pub fn new(fields: Arc<[String]>, mut values: Vec<Value>) -> Self {
        values.resize(fields.len(), Value::Null);
        Self { fields, values }
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Value of the named field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        let index = self.fields.iter().position(|f| f == field)?;
        self.values.get(index)
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Record")?;
        for (field, value) in self.fields.iter().zip(&self.values) {
            match value {
                Value::Node(_) => write!(f, " {field}=<Node>")?,
                Value::Relationship(_) => write!(f, " {field}=<Relationship>")?,
                Value::Path(_) => write!(f, " {field}=<Path>")?,
                other => write!(f, " {field}={}", other.repr())?,
            }
        }
        write!(f, ">")
    }
}
