//! Scripted in-process server for driver and cypher tests

#![allow(clippy::unwrap_used, clippy::panic)]

use std::collections::BTreeMap;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};

use crate::driver::{ChunkReader, ChunkWriter, DriverConfig, Session};
use crate::packstream::{pack, pack_struct_header, unpack, PackValue};

const DUPLEX_CAPACITY: usize = 256 * 1024;

pub(crate) fn message(signature: u8, fields: Vec<PackValue>) -> Vec<u8> {
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

pub(crate) fn map(pairs: Vec<(&str, PackValue)>) -> PackValue {
    PackValue::Map(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

pub(crate) fn success(pairs: Vec<(&str, PackValue)>) -> Vec<u8> {
    message(0x70, vec![map(pairs)])
}

/// SUCCESS reply to RUN naming the result fields
pub(crate) fn fields(names: &[&str]) -> Vec<u8> {
    let names = names.iter().map(|n| PackValue::from(*n)).collect();
    success(vec![("fields", PackValue::List(names))])
}

pub(crate) fn record(values: Vec<PackValue>) -> Vec<u8> {
    message(0x71, vec![PackValue::List(values)])
}

pub(crate) fn failure(code: &str, text: &str) -> Vec<u8> {
    message(
        0x7F,
        vec![map(vec![
            ("code", PackValue::from(code)),
            ("message", PackValue::from(text)),
        ])],
    )
}

pub(crate) fn ignored() -> Vec<u8> {
    message(0x7E, vec![])
}

pub(crate) fn node(id: i64, labels: &[&str], props: Vec<(&str, PackValue)>) -> PackValue {
    PackValue::Structure {
        signature: b'N',
        fields: vec![
            PackValue::Integer(id),
            PackValue::List(labels.iter().map(|l| PackValue::from(*l)).collect()),
            map(props),
        ],
    }
}

/// The far end of a duplex stream, decoding what the client sends
pub(crate) struct ScriptedServer {
    stream: DuplexStream,
    buf: BytesMut,
    reader: ChunkReader,
}

impl ScriptedServer {
    pub(crate) fn new(stream: DuplexStream) -> Self {
        Self {
            stream,
            buf: BytesMut::new(),
            reader: ChunkReader::new(),
        }
    }

    pub(crate) async fn reply(&mut self, data: &[u8]) {
        self.stream.write_all(data).await.unwrap();
    }

    pub(crate) async fn read_exact(&mut self, len: usize) -> Vec<u8> {
        let mut data = vec![0u8; len];
        self.stream.read_exact(&mut data).await.unwrap();
        data
    }

    /// Next client message as `(signature, fields)`
    pub(crate) async fn next_request(&mut self) -> (u8, Vec<PackValue>) {
        loop {
            if let Some(mut data) = self.reader.decode(&mut self.buf) {
                match unpack(&mut data).unwrap() {
                    PackValue::Structure { signature, fields } => return (signature, fields),
                    other => panic!("client sent non-message {other:?}"),
                }
            }
            let n = self.stream.read_buf(&mut self.buf).await.unwrap();
            assert!(n > 0, "client closed the stream");
        }
    }
}

/// Duplex pair with the server half wrapped
pub(crate) fn pair() -> (DuplexStream, ScriptedServer) {
    let (client, server) = tokio::io::duplex(DUPLEX_CAPACITY);
    (client, ScriptedServer::new(server))
}

/// Session that has completed INIT, with `script` queued behind the INIT
/// reply
pub(crate) async fn connected_session(
    script: Vec<Vec<u8>>,
) -> (Session<DuplexStream>, ScriptedServer) {
    connected_session_with(&DriverConfig::new("bolt://localhost"), script).await
}

pub(crate) async fn connected_session_with(
    config: &DriverConfig,
    script: Vec<Vec<u8>>,
) -> (Session<DuplexStream>, ScriptedServer) {
    let (client, mut server) = pair();
    server
        .reply(&success(vec![("server", PackValue::from("Neo4j/3.0.0"))]))
        .await;
    for reply in &script {
        server.reply(reply).await;
    }
    let session = Session::init(client, config).await.unwrap();
    let (signature, _) = server.next_request().await;
    assert_eq!(signature, 0x01, "expected INIT");
    (session, server)
}
