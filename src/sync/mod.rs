//! Synchronous backends for the handshake effects: crypto on the CPU, I/O
//! on a blocking stream.

mod crypto;
mod io;

pub use self::crypto::SyncCrypto;
pub use self::io::SyncStream;

use std::io::{Read, Write};

use crate::effect::{Backend, Request, Response};
use crate::machine::HandshakeError;

/// The composed blocking backend used by `negotiate_secret`: I/O requests
/// go to the stream, everything else to the crypto handler.
pub struct SyncBackend<S> {
    crypto: SyncCrypto,
    stream: SyncStream<S>,
}

impl<S: Read + Write> SyncBackend<S> {
    pub fn new(stream: S) -> SyncBackend<S> {
        SyncBackend {
            crypto: SyncCrypto::new(),
            stream: SyncStream::new(stream),
        }
    }
}

impl<S: Read + Write> Backend for SyncBackend<S> {
    fn handle(&mut self, request: Request) -> Result<Response, HandshakeError> {
        match request {
            Request::DataRead(_) | Request::DataWrite(_) => self.stream.handle(request),
            other => self.crypto.handle(other),
        }
    }
}
