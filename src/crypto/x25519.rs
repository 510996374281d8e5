//! Curve25519 Diffie-Hellman for the ephemeral key agreement.
//!
//! The primitive works in little-endian byte order; XDAA transports public
//! keys big-endian, so the wire codecs here reverse. The keypair stays
//! usable across multiple operations because the handshake extracts the
//! public half and computes the shared secret in separate steps.

use std::fmt;

use rand::rngs::OsRng;
use x25519_dalek::StaticSecret;

use super::Error;

pub const PUBLIC_KEY_SIZE: usize = 32;

/// Decodes a Curve25519 public key from its little-endian byte
/// representation.
pub fn public_key_from_bytes_le(bytes: &[u8]) -> Result<PublicKey, Error> {
    if bytes.len() != PUBLIC_KEY_SIZE {
        return Err(Error::InvalidKeyLength {
            expected: PUBLIC_KEY_SIZE,
            actual: bytes.len(),
        });
    }
    let mut array = [0; PUBLIC_KEY_SIZE];
    array.copy_from_slice(bytes);
    Ok(PublicKey(x25519_dalek::PublicKey::from(array)))
}

/// Decodes a Curve25519 public key from its big-endian byte representation.
pub fn public_key_from_bytes_be(bytes: &[u8]) -> Result<PublicKey, Error> {
    if bytes.len() != PUBLIC_KEY_SIZE {
        return Err(Error::InvalidKeyLength {
            expected: PUBLIC_KEY_SIZE,
            actual: bytes.len(),
        });
    }
    let mut array = [0; PUBLIC_KEY_SIZE];
    array.copy_from_slice(bytes);
    array.reverse();
    Ok(PublicKey(x25519_dalek::PublicKey::from(array)))
}

/// A Curve25519 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(x25519_dalek::PublicKey);

impl PublicKey {
    pub fn to_bytes_le(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0.to_bytes()
    }

    pub fn to_bytes_be(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut bytes = self.0.to_bytes();
        bytes.reverse();
        bytes
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x25519::PublicKey({})", hex::encode(self.to_bytes_be()))
    }
}

/// A Curve25519 keypair.
#[derive(Clone)]
pub struct KeyPair {
    secret: StaticSecret,
    public: x25519_dalek::PublicKey,
}

impl KeyPair {
    /// Generates a fresh random keypair.
    pub fn generate() -> KeyPair {
        let secret = StaticSecret::random_from_rng(OsRng);
        let public = x25519_dalek::PublicKey::from(&secret);
        KeyPair { secret, public }
    }

    pub fn public(&self) -> PublicKey {
        PublicKey(self.public)
    }

    /// Computes the shared secret with the peer's public key. The output is
    /// the primitive's native little-endian form.
    pub fn compute_shared(&self, peer: &PublicKey) -> [u8; 32] {
        self.secret.diffie_hellman(&peer.0).to_bytes()
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "x25519::KeyPair(public: {}, secret: <secret>)",
            hex::encode(self.public.to_bytes())
        )
    }
}
