//! Tests for CypherTransaction

#![allow(clippy::unwrap_used)]

use crate::cypher::{CypherError, CypherResource, MergeNode, Parameters};
use crate::packstream::PackValue;
use crate::testing::{connected_session, fields, record, success, ScriptedServer};

const RUN: u8 = 0x10;

fn empty_result() -> Vec<Vec<u8>> {
    vec![fields(&[]), success(vec![])]
}

async fn next_statement(server: &mut ScriptedServer) -> PackValue {
    loop {
        let (signature, fields) = server.next_request().await;
        if signature == RUN {
            return fields[0].clone();
        }
    }
}

/// Test a transaction from begin through commit
#[tokio::test]
async fn test_begin_process_commit() {
    let mut script = empty_result();
    script.extend([fields(&["n"]), record(vec![PackValue::Integer(1)]), success(vec![])]);
    script.extend(empty_result());
    script.extend(empty_result());
    let (session, mut server) = connected_session(script).await;
    let mut cypher = CypherResource::new(session);

    let mut tx = cypher.begin().await.unwrap();
    tx.append("RETURN 1 AS n", Parameters::new()).unwrap();
    tx.append_task(&MergeNode::new("Person")).unwrap();
    assert_eq!(tx.pending().len(), 2);

    let results = tx.commit().await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].one(), Some(crate::primitives::Value::Integer(1)));
    assert!(tx.is_finished());

    assert_eq!(next_statement(&mut server).await, PackValue::from("BEGIN"));
    assert_eq!(next_statement(&mut server).await, PackValue::from("RETURN 1 AS n"));
    assert_eq!(next_statement(&mut server).await, PackValue::from("MERGE (a:Person)"));
    assert_eq!(next_statement(&mut server).await, PackValue::from("COMMIT"));
}

/// Test that processed statements are not sent again on commit
#[tokio::test]
async fn test_process_then_commit_sends_each_statement_once() {
    let mut script = empty_result();
    for _ in 0..3 {
        script.extend(empty_result());
    }
    let (session, mut server) = connected_session(script).await;
    let mut cypher = CypherResource::new(session);

    let mut tx = cypher.begin().await.unwrap();
    tx.append("CREATE (a)", Parameters::new()).unwrap();
    assert_eq!(tx.process().await.unwrap().len(), 1);
    tx.append("CREATE (b)", Parameters::new()).unwrap();
    assert_eq!(tx.commit().await.unwrap().len(), 1);

    let mut statements = Vec::new();
    for _ in 0..4 {
        statements.push(next_statement(&mut server).await);
    }
    assert_eq!(
        statements,
        vec![
            PackValue::from("BEGIN"),
            PackValue::from("CREATE (a)"),
            PackValue::from("CREATE (b)"),
            PackValue::from("COMMIT"),
        ]
    );
}

/// Test that rollback discards queued statements
#[tokio::test]
async fn test_rollback_discards_queue() {
    let mut script = empty_result();
    script.extend(empty_result());
    let (session, mut server) = connected_session(script).await;
    let mut cypher = CypherResource::new(session);

    let mut tx = cypher.begin().await.unwrap();
    tx.append("CREATE (a)", Parameters::new()).unwrap();
    tx.rollback().await.unwrap();
    assert!(tx.pending().is_empty());

    assert_eq!(next_statement(&mut server).await, PackValue::from("BEGIN"));
    assert_eq!(next_statement(&mut server).await, PackValue::from("ROLLBACK"));
}

/// Test that a finished transaction refuses further use
#[tokio::test]
async fn test_finished_transaction_rejects_use() {
    let mut script = empty_result();
    script.extend(empty_result());
    let (session, _server) = connected_session(script).await;
    let mut cypher = CypherResource::new(session);

    let mut tx = cypher.begin().await.unwrap();
    tx.commit().await.unwrap();

    assert!(matches!(
        tx.append("CREATE (a)", Parameters::new()),
        Err(CypherError::TransactionFinished)
    ));
    assert!(matches!(tx.process().await, Err(CypherError::TransactionFinished)));
    assert!(matches!(tx.commit().await, Err(CypherError::TransactionFinished)));
    assert!(matches!(tx.rollback().await, Err(CypherError::TransactionFinished)));
}
