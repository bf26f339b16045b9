//! Tests for RecordList

use std::sync::Arc;

use crate::cypher::RecordList;
use crate::driver::Record;
use crate::primitives::Value;

fn columns(names: &[&str]) -> Arc<[String]> {
    names.iter().map(|n| (*n).to_string()).collect::<Vec<_>>().into()
}

fn list(names: &[&str], rows: Vec<Vec<Value>>) -> RecordList {
    let columns = columns(names);
    let records = rows
        .into_iter()
        .map(|values| Record::new(Arc::clone(&columns), values))
        .collect();
    RecordList::new(columns, records)
}

/// Test that one() is None without records
#[test]
fn test_one_when_no_records() {
    assert_eq!(list(&["a"], vec![]).one(), None);
}

/// Test that one() gives the value of a single column
#[test]
fn test_one_value_in_result() {
    let records = list(&["a.name"], vec![vec![Value::from("Alice")]]);
    assert_eq!(records.one(), Some(Value::from("Alice")));
}

/// Test that one() gives the first record as a list for several columns
#[test]
fn test_one_record_in_result() {
    let records = list(
        &["a.name", "a.age"],
        vec![vec![Value::from("Alice"), Value::from(33)]],
    );
    assert_eq!(
        records.one(),
        Some(Value::List(vec![Value::from("Alice"), Value::from(33)]))
    );
}

/// Test that one() is None without columns
#[test]
fn test_one_from_record_with_zero_columns() {
    let records = list(&[], vec![vec![]]);
    assert_eq!(records.len(), 1);
    assert_eq!(records.one(), None);
}

/// Test that a one row table renders in three lines
#[test]
fn test_table_with_one_row_has_three_lines() {
    let records = list(
        &["a.name", "a.age"],
        vec![vec![Value::from("Alice"), Value::from(33)]],
    );
    let table = records.to_string();
    assert_eq!(table.lines().count(), 3);
    assert_eq!(
        table,
        " a.name | a.age \n\
         --------+-------\n \
         Alice  | 33    \n"
    );
}

/// Test that columns widen to their longest cell
#[test]
fn test_table_widens_to_longest_cell() {
    let records = list(
        &["n"],
        vec![vec![Value::from("short")], vec![Value::from("much longer")]],
    );
    let lines: Vec<_> = records.to_string().lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], " n           ");
    assert_eq!(lines[1], "-------------");
    assert_eq!(lines[3], " much longer ");
}

/// Test iterating over records
#[test]
fn test_iteration() {
    let records = list(&["x"], vec![vec![Value::from(1)], vec![Value::from(2)]]);
    let values: Vec<_> = records
        .iter()
        .filter_map(|r| r.get("x").and_then(Value::as_i64))
        .collect();
    assert_eq!(values, vec![1, 2]);
    assert_eq!(records.get(1).and_then(|r| r.get_index(0)), Some(&Value::Integer(2)));
}
