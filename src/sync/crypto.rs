use rand::rngs::OsRng;
use rand::RngCore;

use crate::crypto::{secp256r1, x25519};
use crate::effect::{Backend, Request, Response};
use crate::machine::HandshakeError;

/// Satisfies the crypto effects synchronously on the CPU.
pub struct SyncCrypto;

impl SyncCrypto {
    pub fn new() -> SyncCrypto {
        SyncCrypto
    }
}

impl Default for SyncCrypto {
    fn default() -> SyncCrypto {
        SyncCrypto::new()
    }
}

impl Backend for SyncCrypto {
    fn handle(&mut self, request: Request) -> Result<Response, HandshakeError> {
        match request {
            Request::CreateNonce(size) => {
                let mut nonce = vec![0; size];
                OsRng.fill_bytes(&mut nonce);
                Ok(Response::CreateNonce(nonce))
            }
            Request::EphemeralCreateKey => {
                Ok(Response::EphemeralCreateKey(x25519::KeyPair::generate()))
            }
            Request::EphemeralComputeSharedSecret(pair, public) => Ok(
                Response::EphemeralComputeSharedSecret(pair.compute_shared(&public)),
            ),
            Request::EphemeralDecodePublicKey(encoded) => {
                let key = x25519::public_key_from_bytes_be(&encoded)?;
                Ok(Response::EphemeralDecodePublicKey(key))
            }
            Request::EphemeralEncodePublicKey(pair) => Ok(Response::EphemeralEncodePublicKey(
                pair.public().to_bytes_be(),
            )),
            Request::GroupDecodePublicKey(encoded) => {
                let key = secp256r1::public_key_from_encoded_point_hex(&encoded)?;
                Ok(Response::GroupDecodePublicKey(key))
            }
            Request::GroupDecodePrivateKey(encoded) => {
                let key = secp256r1::private_key_from_scalar_hex(&encoded)?;
                Ok(Response::GroupDecodePrivateKey(key))
            }
            Request::GroupSha256SignData(key, data) => {
                Ok(Response::GroupSha256SignData(key.sign_sha256(&data)))
            }
            Request::GroupSha256VerifySignature(key, data, signature) => Ok(
                Response::GroupSha256VerifySignature(key.verify_sha256(&signature, &data)),
            ),
            _ => Err(HandshakeError::UnsupportedEvent),
        }
    }
}
