//! Tests for the run and create-node commands against a local scripted server

#![allow(clippy::unwrap_used, clippy::panic)]

use std::collections::BTreeMap;

use bytes::BytesMut;
use neolink_cli::commands::{connect, create_node, run};
use neolink_cli::ConnectionArgs;
use neolink_core::cypher::Parameters;
use neolink_core::driver::{ChunkReader, ChunkWriter};
use neolink_core::packstream::{pack, pack_struct_header, unpack, PackValue};
use neolink_core::primitives::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const SUCCESS: u8 = 0x70;
const RECORD: u8 = 0x71;

fn message(signature: u8, fields: Vec<PackValue>) -> Vec<u8> {
    let mut body = BytesMut::new();
    pack_struct_header(fields.len(), signature, &mut body).unwrap();
    for field in &fields {
        pack(field, &mut body).unwrap();
    }
    let mut writer = ChunkWriter::new();
    writer.write(&body);
    writer.flush(true);
    writer.take().to_vec()
}

fn success(pairs: Vec<(&str, PackValue)>) -> Vec<u8> {
    let map: BTreeMap<String, PackValue> =
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    message(SUCCESS, vec![PackValue::Map(map)])
}

fn fields(names: &[&str]) -> Vec<u8> {
    let names = names.iter().map(|n| PackValue::from(*n)).collect();
    success(vec![("fields", PackValue::List(names))])
}

async fn read_message(
    stream: &mut TcpStream,
    buf: &mut BytesMut,
    reader: &mut ChunkReader,
) -> (u8, Vec<PackValue>) {
    loop {
        if let Some(mut data) = reader.decode(buf) {
            let PackValue::Structure { signature, fields } = unpack(&mut data).unwrap() else {
                panic!("non-message from client");
            };
            return (signature, fields);
        }
        let n = stream.read_buf(buf).await.unwrap();
        assert!(n > 0, "client closed");
    }
}

/// Accept one connection, agree version 1, answer INIT and then reply to
/// each RUN/PULL_ALL pair with `results`; returns the statements received
async fn serve(results: Vec<Vec<Vec<u8>>>) -> (ConnectionArgs, JoinHandle<Vec<PackValue>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut handshake = [0u8; 16];
        stream.read_exact(&mut handshake).await.unwrap();
        assert_eq!(&handshake[..4], &[0, 0, 0, 1]);
        stream.write_all(&[0, 0, 0, 1]).await.unwrap();

        let mut buf = BytesMut::new();
        let mut reader = ChunkReader::new();
        let (init, _) = read_message(&mut stream, &mut buf, &mut reader).await;
        assert_eq!(init, 0x01);
        stream.write_all(&success(vec![])).await.unwrap();

        let mut statements = Vec::new();
        for replies in results {
            let (_, run) = read_message(&mut stream, &mut buf, &mut reader).await;
            statements.push(run[0].clone());
            let (pull, _) = read_message(&mut stream, &mut buf, &mut reader).await;
            assert_eq!(pull, 0x3F);
            for reply in replies {
                stream.write_all(&reply).await.unwrap();
            }
        }
        statements
    });

    let connection = ConnectionArgs {
        uri: format!("bolt://127.0.0.1:{port}"),
        user: "neo4j".to_string(),
        password: None,
        secure: false,
    };
    (connection, handle)
}

/// Test connecting to a fake server and executing a statement
#[tokio::test]
async fn test_connect_and_execute() {
    let (connection, server) = serve(vec![vec![
        fields(&["n"]),
        message(RECORD, vec![PackValue::List(vec![PackValue::Integer(1)])]),
        success(vec![]),
    ]])
    .await;

    let mut cypher = connect(&connection).await.unwrap();
    let records = cypher
        .execute("RETURN 1 AS n", &Parameters::new())
        .await
        .unwrap();
    assert_eq!(records.one(), Some(Value::Integer(1)));

    let statements = server.await.unwrap();
    assert_eq!(statements, vec![PackValue::from("RETURN 1 AS n")]);
}

/// Test that the run command prints the records it receives
#[tokio::test]
async fn test_run_command() {
    let (connection, server) = serve(vec![vec![
        fields(&["x"]),
        message(RECORD, vec![PackValue::List(vec![PackValue::from("hi")])]),
        success(vec![]),
    ]])
    .await;

    run::run("RETURN {x} AS x", &["x=\"hi\"".to_string()], true, &connection)
        .await
        .unwrap();
    assert_eq!(
        server.await.unwrap(),
        vec![PackValue::from("RETURN {x} AS x")]
    );
}

/// Test that the create-node command creates and prints the node
#[tokio::test]
async fn test_create_node_command() {
    let node = PackValue::Structure {
        signature: b'N',
        fields: vec![
            PackValue::Integer(7),
            PackValue::List(vec![PackValue::from("Person")]),
            PackValue::Map(BTreeMap::new()),
        ],
    };
    let (connection, server) = serve(vec![vec![
        fields(&["a"]),
        message(RECORD, vec![PackValue::List(vec![node])]),
        success(vec![]),
    ]])
    .await;

    create_node::run(&["Person".to_string()], &[], false, &connection)
        .await
        .unwrap();
    assert_eq!(
        server.await.unwrap(),
        vec![PackValue::from("CREATE (a:Person) RETURN a")]
    );
}

/// Test that a refused connection surfaces as an error
#[tokio::test]
async fn test_connect_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let connection = ConnectionArgs {
        uri: format!("bolt://127.0.0.1:{port}"),
        user: "neo4j".to_string(),
        password: None,
        secure: false,
    };
    assert!(connect(&connection).await.is_err());
}

/// Test that a malformed parameter fails before any connection is made
#[tokio::test]
async fn test_bad_parameter_fails_before_connecting() {
    let connection = ConnectionArgs {
        uri: "bolt://127.0.0.1:1".to_string(),
        user: "neo4j".to_string(),
        password: None,
        secure: false,
    };
    let err = run::run("RETURN 1", &["nope".to_string()], false, &connection)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("NAME=JSON"));
}
