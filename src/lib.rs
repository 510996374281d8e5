#![forbid(unsafe_code)]

//! Client implementation of the XDAA handshake.
//!
//! Each party proves membership in a provisioned DAA group by signing an
//! ephemeral X25519 key with its long-term secp256r1 group key; a
//! successful handshake yields a 32-byte shared secret for seeding a
//! subsequent secure channel.
//!
//! The protocol engine ([`Machine`]) is pure: it exchanges effect values
//! with pluggable backends instead of doing I/O or cryptography itself.
//! [`negotiate_secret`] wires the engine to the blocking backends and runs
//! the handshake to completion.

pub mod crypto;
pub mod daa;
pub mod effect;
pub mod machine;
pub mod sync;

pub use wire;

pub use crate::daa::Keys;
pub use crate::effect::{Backend, Request, Response};
pub use crate::machine::{HandshakeError, Machine};
pub use crate::sync::{SyncBackend, SyncCrypto, SyncStream};

use std::io::{Read, Write};

/// Performs the XDAA handshake on the given blocking stream and returns
/// the negotiated shared secret.
///
/// The stream must be an ordered reliable byte channel. On success it is
/// left positioned right after the final handshake message; on error the
/// caller owns closing it.
pub fn negotiate_secret<S>(stream: &mut S, keys: Keys) -> Result<[u8; 32], HandshakeError>
where
    S: Read + Write,
{
    let mut machine = Machine::new(keys);
    let mut backend = SyncBackend::new(stream);

    let mut request = machine.start();
    loop {
        match request {
            Request::Terminated(secret) => return Ok(secret),
            other => {
                let response = backend.handle(other)?;
                request = machine.advance(response)?;
            }
        }
    }
}

#[cfg(test)]
mod test_negotiate;
