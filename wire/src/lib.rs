#![forbid(unsafe_code)]

//! The three XDAA wire messages and their codec.
//!
//! Every message is a fixed-layout header carrying big-endian field lengths,
//! followed by the variable-length fields themselves. Parsing is split into
//! a header phase and a body phase so a caller can read a message off a
//! stream with exactly two reads and no over-allocation.

mod message;

pub use self::message::{
    ClientHello, ClientHelloHeader, ClientKeyExchange, ClientKeyExchangeHeader, ServerKeyExchange,
    ServerKeyExchangeHeader,
};

use std::{error, fmt};

/// Reasons message bytes fail to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The version byte names a protocol revision that does not exist.
    UnsupportedVersion(u8),
    /// The header is not the exact length the message type requires.
    Header { expected: usize, actual: usize },
    /// The body does not match the total of the lengths the header declared.
    Body { expected: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;

        match self {
            &UnsupportedVersion(version) => {
                write!(f, "unsupported protocol version: {}", version)
            }
            &Header { expected, actual } => {
                write!(f, "message header is {} bytes, expected {}", actual, expected)
            }
            &Body { expected, actual } => {
                write!(f, "message body is {} bytes, expected {}", actual, expected)
            }
        }
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod test_message;
