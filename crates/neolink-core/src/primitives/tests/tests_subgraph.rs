//! Tests for subgraph set algebra

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use crate::primitives::{Node, PropertySet, PropertyValue, Relationship, Subgraph};

fn node(label: &str, key: &str, value: i64) -> Node {
    let props = PropertySet::from_pairs([(key, PropertyValue::Integer(value))]).unwrap();
    Node::new([label], props)
}

struct Fixture {
    a: Node,
    b: Node,
    c: Node,
    ab: Relationship,
    bc: Relationship,
}

fn fixture() -> Fixture {
    let a = node("Person", "x", 1);
    let b = node("Person", "y", 2);
    let c = node("Robot", "z", 3);
    let ab = Relationship::new(a.clone(), "KNOWS", b.clone());
    let bc = Relationship::new(b.clone(), "OWNS", c.clone());
    Fixture { a, b, c, ab, bc }
}

/// Test that a node converts to a one-node subgraph
#[test]
fn test_node_converts_to_single_node_subgraph() {
    let f = fixture();
    let sg = Subgraph::from(&f.a);
    assert_eq!(sg.order(), 1);
    assert_eq!(sg.size(), 0);
    assert!(sg.is_empty());
}

/// Test that a relationship subgraph includes its endpoints
#[test]
fn test_relationship_subgraph_includes_endpoints() {
    let f = fixture();
    let sg = Subgraph::from(&f.ab);
    assert_eq!(sg.order(), 2);
    assert_eq!(sg.size(), 1);
    assert!(!sg.is_empty());
    assert!(sg.contains_node(&f.a));
    assert!(sg.contains_node(&f.b));
}

/// Test subgraph union
#[test]
fn test_union() {
    let f = fixture();
    let sg = &Subgraph::from(&f.ab) | &Subgraph::from(&f.bc);
    assert_eq!(sg.order(), 3);
    assert_eq!(sg.size(), 2);
}

/// Test subgraph intersection
#[test]
fn test_intersection() {
    let f = fixture();
    let sg = &Subgraph::from(&f.ab) & &Subgraph::from(&f.bc);
    assert_eq!(sg.order(), 1);
    assert!(sg.contains_node(&f.b));
    assert_eq!(sg.size(), 0);
}

/// Test that difference keeps the endpoints of remaining relationships
#[test]
fn test_difference_keeps_endpoints_of_remaining_relationships() {
    let f = fixture();
    let all = &Subgraph::from(&f.ab) | &Subgraph::from(&f.bc);
    let sg = &all - &Subgraph::from(&f.bc);
    // b was removed by the node difference but is still an endpoint of ab
    assert_eq!(sg.size(), 1);
    assert!(sg.contains_relationship(&f.ab));
    assert!(sg.contains_node(&f.a));
    assert!(sg.contains_node(&f.b));
    assert!(!sg.contains_node(&f.c));
}

/// Test subgraph symmetric difference
#[test]
fn test_symmetric_difference() {
    let f = fixture();
    let sg = &Subgraph::from(&f.ab) ^ &Subgraph::from(&f.bc);
    assert_eq!(sg.size(), 2);
    assert_eq!(sg.order(), 3);
}

/// Test that subgraph equality is by members
#[test]
fn test_equality_is_by_members() {
    let f = fixture();
    let left = &Subgraph::from(&f.ab) | &Subgraph::from(&f.bc);
    let right = &Subgraph::from(&f.bc) | &Subgraph::from(&f.ab);
    assert_eq!(left, right);
    assert_ne!(left, Subgraph::from(&f.ab));
}

/// Test aggregated property keys, labels and types
#[test]
fn test_aggregated_keys_labels_and_types() {
    let f = fixture();
    let sg = &Subgraph::from(&f.ab) | &Subgraph::from(&f.bc);
    assert_eq!(
        sg.property_keys(),
        BTreeSet::from(["x".to_string(), "y".to_string(), "z".to_string()])
    );
    assert_eq!(
        sg.labels(),
        BTreeSet::from(["Person".to_string(), "Robot".to_string()])
    );
    assert_eq!(
        sg.types(),
        BTreeSet::from(["KNOWS".to_string(), "OWNS".to_string()])
    );
}

/// Test the subgraph display format
#[test]
fn test_display() {
    let f = fixture();
    assert_eq!(
        Subgraph::from(&f.ab).to_string(),
        "<Subgraph order=2 size=1>"
    );
}
