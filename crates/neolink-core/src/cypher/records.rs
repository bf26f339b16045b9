//! Buffered statement results

use std::sync::Arc;

use crate::driver::{Record, ResultSet};
use crate::primitives::Value;

/// Columns and records returned by one statement
#[derive(Debug, Clone, PartialEq)]
pub struct RecordList {
    columns: Arc<[String]>,
    records: Vec<Record>,
}

impl RecordList {
    #[must_use]
    pub fn new(columns: Arc<[String]>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// The single value of a one-column result, or the first record as a
    /// list of values
    ///
    /// Returns `None` when there are no records or no columns.
    #[must_use]
    pub fn one(&self) -> Option<Value> {
        let record = self.records.first()?;
        match record.values() {
            [] => None,
            [value] => Some(value.clone()),
            values => Some(Value::List(values.to_vec())),
        }
    }
}

impl Default for RecordList {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()), Vec::new())
    }
}

impl From<ResultSet> for RecordList {
    fn from(result: ResultSet) -> Self {
        Self::new(result.fields, result.records)
    }
}

impl IntoIterator for RecordList {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Renders as a table: a header of column names, a separator line and one
/// line per record
impl std::fmt::Display for RecordList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<Vec<String>> = self
            .records
            .iter()
            .map(|record| record.values().iter().map(ToString::to_string).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain([column.chars().count()])
                    .max()
                    .unwrap_or_default()
            })
            .collect();

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!(" {cell:<width$} "))
                .collect::<Vec<_>>()
                .join("|")
        };

        writeln!(f, "{}", line(&self.columns))?;
        let separator = widths
            .iter()
            .map(|width| "-".repeat(width + 2))
            .collect::<Vec<_>>()
            .join("+");
        writeln!(f, "{separator}")?;
        for row in &rows {
            writeln!(f, "{}", line(row))?;
        }
        Ok(())
    }
}
