use std::{error, fmt};

use zeroize::Zeroizing;

/// The provisioned DAA keys needed for the XDAA handshake.
///
/// The two key fields hold the ASCII hex exactly as provisioned; the engine
/// decodes them during initialization.
#[derive(Clone)]
pub struct Keys {
    pub group_id: Vec<u8>,
    pub server_public_key: Vec<u8>,
    pub client_private_key: Zeroizing<Vec<u8>>,
}

impl Keys {
    pub fn new(group_id: &str, server_public_key: &str, client_private_key: &str) -> Keys {
        Keys {
            group_id: group_id.as_bytes().to_vec(),
            server_public_key: server_public_key.as_bytes().to_vec(),
            client_private_key: Zeroizing::new(client_private_key.as_bytes().to_vec()),
        }
    }

    /// Parses the keys from a comma-separated string of the form
    /// `<group_id>,<server_public_key>,<client_private_key>`. Only the
    /// first two commas split.
    pub fn from_csv(csv: &str) -> Result<Keys, ParseKeysError> {
        let mut fields = csv.splitn(3, ',');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(group_id), Some(server_public_key), Some(client_private_key)) => {
                Ok(Keys::new(group_id, server_public_key, client_private_key))
            }
            _ => Err(ParseKeysError),
        }
    }
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Keys(group_id: {}, server_public_key: {}, client_private_key: <secret>)",
            String::from_utf8_lossy(&self.group_id),
            String::from_utf8_lossy(&self.server_public_key),
        )
    }
}

/// A provisioning string did not have the three comma-separated fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeysError;

impl fmt::Display for ParseKeysError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "expected <group_id>,<server_public_key>,<client_private_key>"
        )
    }
}

impl error::Error for ParseKeysError {}
