//! The XDAA handshake engine.
//!
//! [`Machine`] is a deterministic state machine over the effect vocabulary:
//! it emits one [`Request`] at a time and consumes the matching
//! [`Response`], never touching a socket or a key primitive directly. The
//! final request is [`Request::Terminated`] carrying the negotiated
//! 32-byte secret.


use std::{error, fmt, io, mem};

use zeroize::Zeroizing;

use crate::crypto;
use crate::crypto::{secp256r1, x25519};
use crate::daa::Keys;
use crate::effect::{Request, Response};

// NONCE_SIZE is the length in bytes of the random nonce each side
// contributes to the handshake.
const NONCE_SIZE: usize = 32;

#[derive(Debug)]
pub enum HandshakeError {
    Io(io::Error),
    Crypto(crypto::Error),
    InvalidMessage(wire::Error),
    UnsupportedVersion(u8),
    IncorrectGroup,
    InvalidSignature,
    NotInitializedYet,
    Terminated,
    UnsupportedEvent,
}

impl error::Error for HandshakeError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use self::HandshakeError::*;

        match self {
            &Io(ref e) => Some(e),
            &Crypto(ref e) => Some(e),
            &InvalidMessage(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for HandshakeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::HandshakeError::*;

        match self {
            &Io(ref e) => write!(f, "io error: {}", e),
            &Crypto(ref e) => write!(f, "crypto error: {}", e),
            &InvalidMessage(ref e) => write!(f, "invalid message: {}", e),
            &UnsupportedVersion(version) => {
                write!(f, "unsupported protocol version: {}", version)
            }
            &IncorrectGroup => write!(f, "peer DAA group does not match the provisioned group"),
            &InvalidSignature => write!(f, "peer signature did not verify"),
            &NotInitializedYet => write!(f, "not initialized yet"),
            &Terminated => write!(f, "handshake already terminated"),
            &UnsupportedEvent => write!(f, "event not supported in the current state"),
        }
    }
}

impl From<io::Error> for HandshakeError {
    fn from(e: io::Error) -> HandshakeError {
        HandshakeError::Io(e)
    }
}

impl From<crypto::Error> for HandshakeError {
    fn from(e: crypto::Error) -> HandshakeError {
        HandshakeError::Crypto(e)
    }
}

impl From<wire::Error> for HandshakeError {
    fn from(e: wire::Error) -> HandshakeError {
        match e {
            wire::Error::UnsupportedVersion(version) => HandshakeError::UnsupportedVersion(version),
            other => HandshakeError::InvalidMessage(other),
        }
    }
}

// The scratchpad the handshake fills in as it advances. Each field is
// written once, in declaration order.
#[derive(Debug)]
struct Context {
    daa_group: Keys,
    client_nonce: Option<Vec<u8>>,
    server_nonce: Option<Vec<u8>>,
    client_group_private_key: Option<secp256r1::PrivateKey>,
    server_group_public_key: Option<secp256r1::PublicKey>,
    client_ephemeral_private_key: Option<x25519::KeyPair>,
    server_ephemeral_public_key: Option<x25519::PublicKey>,
    shared_secret: Option<Zeroizing<[u8; 32]>>,
}

impl Context {
    fn new(daa_group: Keys) -> Context {
        Context {
            daa_group,
            client_nonce: None,
            server_nonce: None,
            client_group_private_key: None,
            server_group_public_key: None,
            client_ephemeral_private_key: None,
            server_ephemeral_public_key: None,
            shared_secret: None,
        }
    }
}

// Each variant names the effect result the machine is waiting for.
#[derive(Debug)]
enum State {
    GroupPublicKey,
    GroupPrivateKey,
    Nonce,
    EphemeralKey,
    ClientHelloWritten,
    ServerKeyExchangeHeader,
    ServerKeyExchangeBody(wire::ServerKeyExchangeHeader),
    ServerSignature(wire::ServerKeyExchange),
    ServerEphemeralKey,
    ClientEphemeralKey,
    ClientSignature([u8; x25519::PUBLIC_KEY_SIZE]),
    ClientKeyExchangeWritten,
    SharedSecret,
    Terminal,
}

/// The client side of the XDAA handshake.
///
/// Create one per connection, emit the first request with [`start`], and
/// keep feeding results into [`advance`] until it returns
/// [`Request::Terminated`]. Any error leaves the machine terminal; it is
/// not resumable.
///
/// [`start`]: Machine::start
/// [`advance`]: Machine::advance
#[derive(Debug)]
pub struct Machine {
    state: State,
    context: Context,
}

impl Machine {
    pub fn new(daa_group: Keys) -> Machine {
        Machine {
            state: State::GroupPublicKey,
            context: Context::new(daa_group),
        }
    }

    /// The first request of the handshake.
    pub fn start(&self) -> Request {
        Request::GroupDecodePublicKey(self.context.daa_group.server_public_key.clone())
    }

    /// The negotiated secret, available once the machine has terminated.
    pub fn shared_secret(&self) -> Option<&[u8; 32]> {
        self.context.shared_secret.as_deref()
    }

    /// Feeds one effect result in and returns the next request.
    pub fn advance(&mut self, response: Response) -> Result<Request, HandshakeError> {
        let state = mem::replace(&mut self.state, State::Terminal);
        match (state, response) {
            (State::GroupPublicKey, Response::GroupDecodePublicKey(key)) => {
                self.context.server_group_public_key = Some(key);
                self.state = State::GroupPrivateKey;
                Ok(Request::GroupDecodePrivateKey(
                    self.context.daa_group.client_private_key.to_vec(),
                ))
            }
            (State::GroupPrivateKey, Response::GroupDecodePrivateKey(key)) => {
                self.context.client_group_private_key = Some(key);
                self.state = State::Nonce;
                Ok(Request::CreateNonce(NONCE_SIZE))
            }
            (State::Nonce, Response::CreateNonce(nonce)) => {
                self.context.client_nonce = Some(nonce);
                self.state = State::EphemeralKey;
                Ok(Request::EphemeralCreateKey)
            }
            (State::EphemeralKey, Response::EphemeralCreateKey(key)) => {
                self.context.client_ephemeral_private_key = Some(key);
                let client_nonce = self
                    .context
                    .client_nonce
                    .clone()
                    .ok_or(HandshakeError::NotInitializedYet)?;
                let hello =
                    wire::ClientHello::new(self.context.daa_group.group_id.clone(), client_nonce);
                self.state = State::ClientHelloWritten;
                Ok(Request::DataWrite(hello.serialize()))
            }
            (State::ClientHelloWritten, Response::DataWrite) => {
                self.state = State::ServerKeyExchangeHeader;
                Ok(Request::DataRead(wire::ServerKeyExchange::HEADER_LEN))
            }
            (State::ServerKeyExchangeHeader, Response::DataRead(data)) => {
                let header = wire::ServerKeyExchange::parse_header(&data)?;
                let body_len = header.body_len();
                self.state = State::ServerKeyExchangeBody(header);
                Ok(Request::DataRead(body_len))
            }
            (State::ServerKeyExchangeBody(header), Response::DataRead(data)) => {
                let message = header.parse_body(&data)?;
                if message.server_group_id != self.context.daa_group.group_id {
                    return Err(HandshakeError::IncorrectGroup);
                }
                let client_nonce = self
                    .context
                    .client_nonce
                    .as_ref()
                    .ok_or(HandshakeError::NotInitializedYet)?;
                let signed = wire::ServerKeyExchange::serialize_for_signature(
                    &message.server_ecdhe_public_key,
                    client_nonce,
                );
                let key = self
                    .context
                    .server_group_public_key
                    .clone()
                    .ok_or(HandshakeError::NotInitializedYet)?;
                let signature = message.signature.clone();
                self.state = State::ServerSignature(message);
                Ok(Request::GroupSha256VerifySignature(key, signed, signature))
            }
            (State::ServerSignature(message), Response::GroupSha256VerifySignature(verified)) => {
                if !verified {
                    return Err(HandshakeError::InvalidSignature);
                }
                self.context.server_nonce = Some(message.server_nonce);
                self.state = State::ServerEphemeralKey;
                Ok(Request::EphemeralDecodePublicKey(
                    message.server_ecdhe_public_key,
                ))
            }
            (State::ServerEphemeralKey, Response::EphemeralDecodePublicKey(key)) => {
                self.context.server_ephemeral_public_key = Some(key);
                let pair = self
                    .context
                    .client_ephemeral_private_key
                    .clone()
                    .ok_or(HandshakeError::NotInitializedYet)?;
                self.state = State::ClientEphemeralKey;
                Ok(Request::EphemeralEncodePublicKey(pair))
            }
            (State::ClientEphemeralKey, Response::EphemeralEncodePublicKey(encoded)) => {
                let server_nonce = self
                    .context
                    .server_nonce
                    .as_ref()
                    .ok_or(HandshakeError::NotInitializedYet)?;
                let signed =
                    wire::ClientKeyExchange::serialize_for_signature(&encoded, server_nonce);
                let key = self
                    .context
                    .client_group_private_key
                    .clone()
                    .ok_or(HandshakeError::NotInitializedYet)?;
                self.state = State::ClientSignature(encoded);
                Ok(Request::GroupSha256SignData(key, signed))
            }
            (State::ClientSignature(encoded), Response::GroupSha256SignData(signature)) => {
                let message = wire::ClientKeyExchange::new(encoded.to_vec(), signature);
                self.state = State::ClientKeyExchangeWritten;
                Ok(Request::DataWrite(message.serialize()))
            }
            (State::ClientKeyExchangeWritten, Response::DataWrite) => {
                let pair = self
                    .context
                    .client_ephemeral_private_key
                    .clone()
                    .ok_or(HandshakeError::NotInitializedYet)?;
                let key = self
                    .context
                    .server_ephemeral_public_key
                    .clone()
                    .ok_or(HandshakeError::NotInitializedYet)?;
                self.state = State::SharedSecret;
                Ok(Request::EphemeralComputeSharedSecret(pair, key))
            }
            (State::SharedSecret, Response::EphemeralComputeSharedSecret(mut secret)) => {
                // The DH output is little-endian; the negotiated secret is
                // its big-endian form, matching the wire order of the
                // public keys.
                secret.reverse();
                self.context.shared_secret = Some(Zeroizing::new(secret));
                self.state = State::Terminal;
                Ok(Request::Terminated(secret))
            }
            (State::Terminal, _) => Err(HandshakeError::Terminated),
            _ => Err(HandshakeError::UnsupportedEvent),
        }
    }
}
