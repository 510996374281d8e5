use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use rand::rngs::OsRng;
use rand::RngCore;

use wire::{ClientHello, ClientKeyExchange, ServerKeyExchange};

use crate::crypto::{secp256r1, x25519};
use crate::daa::Keys;
use crate::machine::HandshakeError;
use crate::negotiate_secret;

const CSV: &str =
    "123456789,04DDD7D190CA38B9891DFEA3BD542A0E29CCF413B7020D8EF85F5821BFD3C03E5684409AB42C897FB7BE3DF4D6BFDA59F97217144306BC577B9FDF8BEB24158432,3FEA28D30FF2B3C16900B9DC77F0AF631C5CFB9103BC23D35BA10FF333A46C3E";

fn read_exact(stream: &mut TcpStream, size: usize) -> Vec<u8> {
    let mut buf = vec![0; size];
    stream.read_exact(&mut buf).unwrap();
    buf
}

// The server half of the handshake, spoken directly over the socket.
fn serve(listener: TcpListener) -> [u8; 32] {
    let (mut stream, _) = listener.accept().unwrap();
    let keys = Keys::from_csv(CSV).unwrap();

    let header = read_exact(&mut stream, ClientHello::HEADER_LEN);
    let header = ClientHello::parse_header(&header).unwrap();
    let body = read_exact(&mut stream, header.body_len());
    let hello = header.parse_body(&body).unwrap();
    assert_eq!(hello.client_group_id, keys.group_id);

    let mut server_nonce = vec![0; 32];
    OsRng.fill_bytes(&mut server_nonce);
    let ephemeral = x25519::KeyPair::generate();
    let public = ephemeral.public().to_bytes_be();

    let group_private_key =
        secp256r1::private_key_from_scalar_hex(&keys.client_private_key).unwrap();
    let signed = ServerKeyExchange::serialize_for_signature(&public, &hello.client_nonce);
    let signature = group_private_key.sign_sha256(&signed);

    let message = ServerKeyExchange::new(
        keys.group_id.clone(),
        server_nonce.clone(),
        public.to_vec(),
        signature,
    );
    stream.write_all(&message.serialize()).unwrap();

    let header = read_exact(&mut stream, ClientKeyExchange::HEADER_LEN);
    let header = ClientKeyExchange::parse_header(&header).unwrap();
    let body = read_exact(&mut stream, header.body_len());
    let key_exchange = header.parse_body(&body).unwrap();

    let group_public_key =
        secp256r1::public_key_from_encoded_point_hex(&keys.server_public_key).unwrap();
    let signed = ClientKeyExchange::serialize_for_signature(
        &key_exchange.client_ecdhe_public_key,
        &server_nonce,
    );
    assert!(group_public_key.verify_sha256(&key_exchange.signature, &signed));

    let client_public =
        x25519::public_key_from_bytes_be(&key_exchange.client_ecdhe_public_key).unwrap();
    let mut secret = ephemeral.compute_shared(&client_public);
    secret.reverse();
    secret
}

#[test]
fn negotiate_secret_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || serve(listener));

    let mut stream = TcpStream::connect(addr).unwrap();
    let secret = negotiate_secret(&mut stream, Keys::from_csv(CSV).unwrap()).unwrap();

    assert_eq!(secret, server.join().unwrap());
}

#[test]
fn negotiate_secret_fails_when_the_peer_closes_early() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        // Consume the ClientHello, then hang up before replying.
        let header = read_exact(&mut stream, ClientHello::HEADER_LEN);
        let header = ClientHello::parse_header(&header).unwrap();
        read_exact(&mut stream, header.body_len());
    });

    let mut stream = TcpStream::connect(addr).unwrap();
    match negotiate_secret(&mut stream, Keys::from_csv(CSV).unwrap()) {
        Err(HandshakeError::Io(_)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
    server.join().unwrap();
}
