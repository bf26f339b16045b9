//! Tests for protocol messages

#![allow(clippy::unwrap_used, clippy::panic)]

use std::collections::BTreeMap;

use bytes::{Bytes, BytesMut};

use crate::driver::{AuthToken, DriverError, Request, Response};
use crate::packstream::PackValue;
use crate::testing::map;

fn encoded(request: &Request) -> Vec<u8> {
    let mut buf = BytesMut::new();
    request.encode(&mut buf).unwrap();
    buf.to_vec()
}

/// Test the bytes of PULL_ALL
#[test]
fn test_pull_all_encoding() {
    assert_eq!(encoded(&Request::PullAll), vec![0xB0, 0x3F]);
    assert_eq!(encoded(&Request::DiscardAll), vec![0xB0, 0x2F]);
    assert_eq!(encoded(&Request::AckFailure), vec![0xB0, 0x0F]);
}

/// Test the bytes of RUN
#[test]
fn test_run_encoding() {
    let request = Request::Run {
        statement: "RETURN 1".to_string(),
        parameters: BTreeMap::new(),
    };
    let mut expected = vec![0xB2, 0x10, 0x88];
    expected.extend_from_slice(b"RETURN 1");
    expected.push(0xA0);
    assert_eq!(encoded(&request), expected);
}

/// Test that INIT without credentials has one field
#[test]
fn test_init_without_auth_has_one_field() {
    let request = Request::Init {
        user_agent: "ua".to_string(),
        auth: None,
    };
    assert_eq!(encoded(&request), vec![0xB1, 0x01, 0x82, b'u', b'a']);
}

/// Test that INIT with credentials sends the token map
#[test]
fn test_init_with_auth_sends_token_map() {
    let request = Request::Init {
        user_agent: "ua".to_string(),
        auth: Some(AuthToken::basic("u", "p")),
    };
    let bytes = encoded(&request);
    assert_eq!(&bytes[..2], &[0xB2, 0x01]);
    let mut rest = Bytes::copy_from_slice(&bytes[2..]);
    assert_eq!(crate::packstream::unpack(&mut rest).unwrap(), PackValue::from("ua"));
    assert_eq!(
        crate::packstream::unpack(&mut rest).unwrap(),
        map(vec![
            ("credentials", PackValue::from("p")),
            ("principal", PackValue::from("u")),
            ("scheme", PackValue::from("basic")),
        ])
    );
}

/// Test decoding each response kind
#[test]
fn test_decode_responses() {
    let success = Bytes::from_static(&[0xB1, 0x70, 0xA0]);
    assert_eq!(
        Response::decode(success).unwrap(),
        Response::Success(BTreeMap::new())
    );

    let record = Bytes::from_static(&[0xB1, 0x71, 0x91, 0x01]);
    assert_eq!(
        Response::decode(record).unwrap(),
        Response::Record(vec![PackValue::Integer(1)])
    );

    let ignored = Bytes::from_static(&[0xB0, 0x7E]);
    assert_eq!(Response::decode(ignored).unwrap(), Response::Ignored);
}

/// Test that data that is not a message is rejected
#[test]
fn test_decode_rejects_non_message() {
    let err = Response::decode(Bytes::from_static(&[0x01])).unwrap_err();
    match err {
        DriverError::Protocol(message) => {
            assert_eq!(message, "Non-message data received from server");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

/// Test that an unknown message signature is rejected
#[test]
fn test_decode_rejects_unknown_signature() {
    assert!(matches!(
        Response::decode(Bytes::from_static(&[0xB0, 0x55])),
        Err(DriverError::Protocol(_))
    ));
}
