use std::io::{Read, Write};

use crate::effect::{Backend, Request, Response};
use crate::machine::HandshakeError;

/// Satisfies the I/O effects on a blocking stream.
///
/// `DataRead(n)` reads exactly `n` bytes: a peer that closes first causes
/// an error, never a short buffer.
pub struct SyncStream<S> {
    stream: S,
}

impl<S> SyncStream<S> {
    pub fn new(stream: S) -> SyncStream<S> {
        SyncStream { stream }
    }
}

impl<S: Read + Write> Backend for SyncStream<S> {
    fn handle(&mut self, request: Request) -> Result<Response, HandshakeError> {
        match request {
            Request::DataWrite(data) => {
                self.stream.write_all(&data)?;
                Ok(Response::DataWrite)
            }
            Request::DataRead(size) => {
                let mut data = vec![0; size];
                self.stream.read_exact(&mut data)?;
                Ok(Response::DataRead(data))
            }
            _ => Err(HandshakeError::UnsupportedEvent),
        }
    }
}
