//! The closed vocabulary of side effects exchanged between the handshake
//! engine and its backends.
//!
//! The engine performs no I/O and invokes no cryptography itself: every
//! side effect it needs is reified as a [`Request`] value, and a backend
//! hands the matching [`Response`] back. That boundary is the only seam
//! between protocol logic and the outside world, so the same engine runs
//! unchanged under blocking sockets, async runtimes, or in-memory test
//! harnesses.

use crate::crypto::{secp256r1, x25519};
use crate::machine::HandshakeError;

/// A side effect the engine needs performed before it can continue.
#[derive(Debug, Clone)]
pub enum Request {
    /// Send the whole buffer to the peer.
    DataWrite(Vec<u8>),
    /// Read exactly this many bytes from the peer.
    DataRead(usize),
    /// Produce this many cryptographically random bytes.
    CreateNonce(usize),
    /// Generate a fresh X25519 keypair.
    EphemeralCreateKey,
    /// Run X25519 between our ephemeral keypair and the peer's public key.
    EphemeralComputeSharedSecret(x25519::KeyPair, x25519::PublicKey),
    /// Decode a peer public key from its big-endian wire bytes.
    EphemeralDecodePublicKey(Vec<u8>),
    /// Encode our ephemeral public key into big-endian wire bytes.
    EphemeralEncodePublicKey(x25519::KeyPair),
    /// Decode a group public key from the hex of an SEC1 encoded point.
    GroupDecodePublicKey(Vec<u8>),
    /// Decode a group private key from the hex of a big-endian scalar.
    GroupDecodePrivateKey(Vec<u8>),
    /// ECDSA-sign the SHA-256 digest of the data.
    GroupSha256SignData(secp256r1::PrivateKey, Vec<u8>),
    /// Check an ECDSA signature over the SHA-256 digest of the data.
    GroupSha256VerifySignature(secp256r1::PublicKey, Vec<u8>, Vec<u8>),
    /// The handshake is complete and this carries the negotiated secret.
    /// Not a request for any backend; the driver stops here.
    Terminated([u8; 32]),
}

/// The result a backend produces for the matching [`Request`].
#[derive(Debug, Clone)]
pub enum Response {
    DataWrite,
    DataRead(Vec<u8>),
    CreateNonce(Vec<u8>),
    EphemeralCreateKey(x25519::KeyPair),
    EphemeralComputeSharedSecret([u8; 32]),
    EphemeralDecodePublicKey(x25519::PublicKey),
    EphemeralEncodePublicKey([u8; 32]),
    GroupDecodePublicKey(secp256r1::PublicKey),
    GroupDecodePrivateKey(secp256r1::PrivateKey),
    GroupSha256SignData(Vec<u8>),
    GroupSha256VerifySignature(bool),
}

/// A satisfier of effect requests.
pub trait Backend {
    fn handle(&mut self, request: Request) -> Result<Response, HandshakeError>;
}
