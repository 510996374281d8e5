use proptest::collection::vec;
use proptest::prelude::*;

use crate::{ClientHello, ClientKeyExchange, Error, ServerKeyExchange};

fn decode_client_hello(data: &[u8]) -> Result<ClientHello, Error> {
    let split = data.len().min(ClientHello::HEADER_LEN);
    let header = ClientHello::parse_header(&data[..split])?;
    header.parse_body(&data[split..])
}

fn decode_server_key_exchange(data: &[u8]) -> Result<ServerKeyExchange, Error> {
    let split = data.len().min(ServerKeyExchange::HEADER_LEN);
    let header = ServerKeyExchange::parse_header(&data[..split])?;
    header.parse_body(&data[split..])
}

fn decode_client_key_exchange(data: &[u8]) -> Result<ClientKeyExchange, Error> {
    let split = data.len().min(ClientKeyExchange::HEADER_LEN);
    let header = ClientKeyExchange::parse_header(&data[..split])?;
    header.parse_body(&data[split..])
}

proptest! {
    #[test]
    fn client_hello_parse_inverts_serialize(
        client_group_id in vec(any::<u8>(), 0..64),
        client_nonce in vec(any::<u8>(), 0..64),
    ) {
        let message = ClientHello::new(client_group_id, client_nonce);
        let decoded = decode_client_hello(&message.serialize()).unwrap();
        prop_assert_eq!(decoded, message);
    }

    #[test]
    fn server_key_exchange_parse_inverts_serialize(
        server_group_id in vec(any::<u8>(), 0..64),
        server_nonce in vec(any::<u8>(), 0..64),
        server_ecdhe_public_key in vec(any::<u8>(), 0..64),
        signature in vec(any::<u8>(), 0..64),
    ) {
        let message = ServerKeyExchange::new(
            server_group_id,
            server_nonce,
            server_ecdhe_public_key,
            signature,
        );
        let decoded = decode_server_key_exchange(&message.serialize()).unwrap();
        prop_assert_eq!(decoded, message);
    }

    #[test]
    fn client_key_exchange_parse_inverts_serialize(
        client_ecdhe_public_key in vec(any::<u8>(), 0..64),
        signature in vec(any::<u8>(), 0..64),
    ) {
        let message = ClientKeyExchange::new(client_ecdhe_public_key, signature);
        let decoded = decode_client_key_exchange(&message.serialize()).unwrap();
        prop_assert_eq!(decoded, message);
    }
}

#[test]
fn client_hello_with_invalid_version_fails_to_parse() {
    assert_eq!(
        decode_client_hello(b"\x01\x00\x01\x00\x01ab"),
        Err(Error::UnsupportedVersion(1))
    );
}

#[test]
fn client_hello_with_partial_header_fails_to_parse() {
    assert_eq!(
        decode_client_hello(b"\x00\x00\x01\x01"),
        Err(Error::Header {
            expected: 5,
            actual: 4,
        })
    );
}

#[test]
fn client_hello_with_body_shorter_than_header_declares_fails_to_parse() {
    assert_eq!(
        decode_client_hello(b"\x00\x00\x01\x00\x02ab"),
        Err(Error::Body {
            expected: 3,
            actual: 2,
        })
    );
}

#[test]
fn server_key_exchange_with_invalid_version_fails_to_parse() {
    assert_eq!(
        decode_server_key_exchange(b"\x01\x00\x01\x00\x01\x00\x01\x00\x01abcd"),
        Err(Error::UnsupportedVersion(1))
    );
}

#[test]
fn server_key_exchange_with_partial_header_fails_to_parse() {
    assert_eq!(
        decode_server_key_exchange(b"\x00\x00\x10\x10"),
        Err(Error::Header {
            expected: 9,
            actual: 4,
        })
    );
}

#[test]
fn server_key_exchange_with_body_shorter_than_header_declares_fails_to_parse() {
    assert_eq!(
        decode_server_key_exchange(b"\x00\x00\x01\x00\x01\x00\x01\x00\x02abcd"),
        Err(Error::Body {
            expected: 5,
            actual: 4,
        })
    );
}

#[test]
fn client_key_exchange_with_invalid_version_fails_to_parse() {
    assert_eq!(
        decode_client_key_exchange(b"\x01\x00\x01\x00\x01ab"),
        Err(Error::UnsupportedVersion(1))
    );
}

#[test]
fn client_key_exchange_with_partial_header_fails_to_parse() {
    assert_eq!(
        decode_client_key_exchange(b"\x00\x00\x10\x10"),
        Err(Error::Header {
            expected: 5,
            actual: 4,
        })
    );
}

#[test]
fn client_key_exchange_with_body_shorter_than_header_declares_fails_to_parse() {
    assert_eq!(
        decode_client_key_exchange(b"\x00\x00\x01\x00\x02ab"),
        Err(Error::Body {
            expected: 3,
            actual: 2,
        })
    );
}

#[test]
fn server_serialize_for_signature_concatenates_key_and_nonce() {
    assert_eq!(
        ServerKeyExchange::serialize_for_signature(b"abcdef", b"12345"),
        b"abcdef12345"
    );
}

#[test]
fn client_serialize_for_signature_concatenates_key_and_nonce() {
    assert_eq!(
        ClientKeyExchange::serialize_for_signature(b"abcdef", b"12345"),
        b"abcdef12345"
    );
}
