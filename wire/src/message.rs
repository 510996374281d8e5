use byteorder::{BigEndian, ByteOrder};

use crate::Error;

// The only protocol revision in existence. Every message leads with this
// byte, and parsing rejects anything else.
const VERSION: u8 = 0;

fn parse_version(byte: u8) -> Result<(), Error> {
    if byte != VERSION {
        return Err(Error::UnsupportedVersion(byte));
    }
    Ok(())
}

fn check_header(header: &[u8], expected: usize) -> Result<(), Error> {
    if header.len() != expected {
        return Err(Error::Header {
            expected,
            actual: header.len(),
        });
    }
    Ok(())
}

fn check_body(body: &[u8], expected: usize) -> Result<(), Error> {
    if body.len() != expected {
        return Err(Error::Body {
            expected,
            actual: body.len(),
        });
    }
    Ok(())
}

fn put_u16(buf: &mut Vec<u8>, value: usize) {
    let mut bytes = [0; 2];
    BigEndian::write_u16(&mut bytes, value as u16);
    buf.extend_from_slice(&bytes);
}

/// The first message of the handshake. The client advertises its DAA group
/// and contributes a fresh nonce for the server to sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHello {
    pub client_group_id: Vec<u8>,
    pub client_nonce: Vec<u8>,
}

impl ClientHello {
    pub const HEADER_LEN: usize = 5;

    pub fn new(client_group_id: Vec<u8>, client_nonce: Vec<u8>) -> Self {
        debug_assert!(client_group_id.len() <= u16::MAX as usize);
        debug_assert!(client_nonce.len() <= u16::MAX as usize);
        ClientHello {
            client_group_id,
            client_nonce,
        }
    }

    /// Parses the 5-byte header. The returned value holds the field lengths
    /// needed to read and parse the body.
    pub fn parse_header(header: &[u8]) -> Result<ClientHelloHeader, Error> {
        check_header(header, Self::HEADER_LEN)?;
        parse_version(header[0])?;
        Ok(ClientHelloHeader {
            client_group_id_len: BigEndian::read_u16(&header[1..3]) as usize,
            client_nonce_len: BigEndian::read_u16(&header[3..5]) as usize,
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            Self::HEADER_LEN + self.client_group_id.len() + self.client_nonce.len(),
        );
        buf.push(VERSION);
        put_u16(&mut buf, self.client_group_id.len());
        put_u16(&mut buf, self.client_nonce.len());
        buf.extend_from_slice(&self.client_group_id);
        buf.extend_from_slice(&self.client_nonce);
        buf
    }
}

/// Field lengths learned from a `ClientHello` header, consumed by
/// `parse_body` once the body bytes are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientHelloHeader {
    client_group_id_len: usize,
    client_nonce_len: usize,
}

impl ClientHelloHeader {
    pub fn body_len(&self) -> usize {
        self.client_group_id_len + self.client_nonce_len
    }

    pub fn parse_body(self, body: &[u8]) -> Result<ClientHello, Error> {
        check_body(body, self.body_len())?;
        let (client_group_id, client_nonce) = body.split_at(self.client_group_id_len);
        Ok(ClientHello {
            client_group_id: client_group_id.to_vec(),
            client_nonce: client_nonce.to_vec(),
        })
    }
}

/// The server's reply: its group, its nonce, its ephemeral ECDHE public key,
/// and the DER signature binding that key to the client's nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerKeyExchange {
    pub server_group_id: Vec<u8>,
    pub server_nonce: Vec<u8>,
    pub server_ecdhe_public_key: Vec<u8>,
    pub signature: Vec<u8>,
}

impl ServerKeyExchange {
    pub const HEADER_LEN: usize = 9;

    pub fn new(
        server_group_id: Vec<u8>,
        server_nonce: Vec<u8>,
        server_ecdhe_public_key: Vec<u8>,
        signature: Vec<u8>,
    ) -> Self {
        debug_assert!(server_group_id.len() <= u16::MAX as usize);
        debug_assert!(server_nonce.len() <= u16::MAX as usize);
        debug_assert!(server_ecdhe_public_key.len() <= u16::MAX as usize);
        debug_assert!(signature.len() <= u16::MAX as usize);
        ServerKeyExchange {
            server_group_id,
            server_nonce,
            server_ecdhe_public_key,
            signature,
        }
    }

    /// The exact byte string the server signs: its ephemeral public key
    /// followed by the client's nonce.
    pub fn serialize_for_signature(
        server_ecdhe_public_key: &[u8],
        client_nonce: &[u8],
    ) -> Vec<u8> {
        let mut buf = Vec::with_capacity(server_ecdhe_public_key.len() + client_nonce.len());
        buf.extend_from_slice(server_ecdhe_public_key);
        buf.extend_from_slice(client_nonce);
        buf
    }

    /// Parses the 9-byte header. The returned value holds the field lengths
    /// needed to read and parse the body.
    pub fn parse_header(header: &[u8]) -> Result<ServerKeyExchangeHeader, Error> {
        check_header(header, Self::HEADER_LEN)?;
        parse_version(header[0])?;
        Ok(ServerKeyExchangeHeader {
            server_group_id_len: BigEndian::read_u16(&header[1..3]) as usize,
            server_nonce_len: BigEndian::read_u16(&header[3..5]) as usize,
            server_ecdhe_public_key_len: BigEndian::read_u16(&header[5..7]) as usize,
            signature_len: BigEndian::read_u16(&header[7..9]) as usize,
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::HEADER_LEN + self.body_len());
        buf.push(VERSION);
        put_u16(&mut buf, self.server_group_id.len());
        put_u16(&mut buf, self.server_nonce.len());
        put_u16(&mut buf, self.server_ecdhe_public_key.len());
        put_u16(&mut buf, self.signature.len());
        buf.extend_from_slice(&self.server_group_id);
        buf.extend_from_slice(&self.server_nonce);
        buf.extend_from_slice(&self.server_ecdhe_public_key);
        buf.extend_from_slice(&self.signature);
        buf
    }

    fn body_len(&self) -> usize {
        self.server_group_id.len()
            + self.server_nonce.len()
            + self.server_ecdhe_public_key.len()
            + self.signature.len()
    }
}

/// Field lengths learned from a `ServerKeyExchange` header, consumed by
/// `parse_body` once the body bytes are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerKeyExchangeHeader {
    server_group_id_len: usize,
    server_nonce_len: usize,
    server_ecdhe_public_key_len: usize,
    signature_len: usize,
}

impl ServerKeyExchangeHeader {
    pub fn body_len(&self) -> usize {
        self.server_group_id_len
            + self.server_nonce_len
            + self.server_ecdhe_public_key_len
            + self.signature_len
    }

    pub fn parse_body(self, body: &[u8]) -> Result<ServerKeyExchange, Error> {
        check_body(body, self.body_len())?;
        let (server_group_id, rest) = body.split_at(self.server_group_id_len);
        let (server_nonce, rest) = rest.split_at(self.server_nonce_len);
        let (server_ecdhe_public_key, signature) = rest.split_at(self.server_ecdhe_public_key_len);
        Ok(ServerKeyExchange {
            server_group_id: server_group_id.to_vec(),
            server_nonce: server_nonce.to_vec(),
            server_ecdhe_public_key: server_ecdhe_public_key.to_vec(),
            signature: signature.to_vec(),
        })
    }
}

/// The client's final message: its ephemeral ECDHE public key and the DER
/// signature binding that key to the server's nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKeyExchange {
    pub client_ecdhe_public_key: Vec<u8>,
    pub signature: Vec<u8>,
}

impl ClientKeyExchange {
    pub const HEADER_LEN: usize = 5;

    pub fn new(client_ecdhe_public_key: Vec<u8>, signature: Vec<u8>) -> Self {
        debug_assert!(client_ecdhe_public_key.len() <= u16::MAX as usize);
        debug_assert!(signature.len() <= u16::MAX as usize);
        ClientKeyExchange {
            client_ecdhe_public_key,
            signature,
        }
    }

    /// The exact byte string the client signs: its ephemeral public key
    /// followed by the server's nonce.
    pub fn serialize_for_signature(
        client_ecdhe_public_key: &[u8],
        server_nonce: &[u8],
    ) -> Vec<u8> {
        let mut buf = Vec::with_capacity(client_ecdhe_public_key.len() + server_nonce.len());
        buf.extend_from_slice(client_ecdhe_public_key);
        buf.extend_from_slice(server_nonce);
        buf
    }

    /// Parses the 5-byte header. The returned value holds the field lengths
    /// needed to read and parse the body.
    pub fn parse_header(header: &[u8]) -> Result<ClientKeyExchangeHeader, Error> {
        check_header(header, Self::HEADER_LEN)?;
        parse_version(header[0])?;
        Ok(ClientKeyExchangeHeader {
            client_ecdhe_public_key_len: BigEndian::read_u16(&header[1..3]) as usize,
            signature_len: BigEndian::read_u16(&header[3..5]) as usize,
        })
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            Self::HEADER_LEN + self.client_ecdhe_public_key.len() + self.signature.len(),
        );
        buf.push(VERSION);
        put_u16(&mut buf, self.client_ecdhe_public_key.len());
        put_u16(&mut buf, self.signature.len());
        buf.extend_from_slice(&self.client_ecdhe_public_key);
        buf.extend_from_slice(&self.signature);
        buf
    }
}

/// Field lengths learned from a `ClientKeyExchange` header, consumed by
/// `parse_body` once the body bytes are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientKeyExchangeHeader {
    client_ecdhe_public_key_len: usize,
    signature_len: usize,
}

impl ClientKeyExchangeHeader {
    pub fn body_len(&self) -> usize {
        self.client_ecdhe_public_key_len + self.signature_len
    }

    pub fn parse_body(self, body: &[u8]) -> Result<ClientKeyExchange, Error> {
        check_body(body, self.body_len())?;
        let (client_ecdhe_public_key, signature) = body.split_at(self.client_ecdhe_public_key_len);
        Ok(ClientKeyExchange {
            client_ecdhe_public_key: client_ecdhe_public_key.to_vec(),
            signature: signature.to_vec(),
        })
    }
}
