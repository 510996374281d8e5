//! Wrappers over the elliptic-curve primitives the handshake uses: P-256
//! ECDSA for the long-term group identities and X25519 for the ephemeral
//! key agreement.

pub mod secp256r1;
pub mod x25519;

use std::{error, fmt};

/// Errors from decoding provisioned or peer-supplied key material.
#[derive(Debug)]
pub enum Error {
    Hex(hex::FromHexError),
    Ecdsa(p256::ecdsa::Error),
    InvalidKeyLength { expected: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;

        match self {
            &Hex(ref e) => write!(f, "invalid hex encoding: {}", e),
            &Ecdsa(ref e) => write!(f, "invalid key material: {}", e),
            &InvalidKeyLength { expected, actual } => write!(
                f,
                "invalid key length: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use self::Error::*;

        match self {
            &Hex(ref e) => Some(e),
            &Ecdsa(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Error {
        Error::Hex(e)
    }
}
