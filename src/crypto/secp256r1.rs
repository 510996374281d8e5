//! ECDSA over secp256r1, the signature scheme of the DAA group identities.
//!
//! Provisioned keys arrive as ASCII hex: the server's public key as an SEC1
//! uncompressed point, the client's private key as a 32-byte big-endian
//! scalar. Signatures travel as DER.

use std::fmt;

use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;

use super::Error;

/// Decodes a public key from an SEC1 encoded point.
pub fn public_key_from_encoded_point(point: &[u8]) -> Result<PublicKey, Error> {
    let key = VerifyingKey::from_sec1_bytes(point).map_err(Error::Ecdsa)?;
    Ok(PublicKey(key))
}

/// Decodes a public key from an SEC1 encoded point expressed as ASCII hex.
pub fn public_key_from_encoded_point_hex(point: &[u8]) -> Result<PublicKey, Error> {
    public_key_from_encoded_point(&hex::decode(point)?)
}

/// Decodes a private key from a 32-byte big-endian scalar.
pub fn private_key_from_scalar(scalar: &[u8]) -> Result<PrivateKey, Error> {
    let key = SigningKey::from_slice(scalar).map_err(Error::Ecdsa)?;
    Ok(PrivateKey(key))
}

/// Decodes a private key from a 32-byte big-endian scalar expressed as
/// ASCII hex.
pub fn private_key_from_scalar_hex(scalar: &[u8]) -> Result<PrivateKey, Error> {
    private_key_from_scalar(&hex::decode(scalar)?)
}

/// An ECDSA public key on secp256r1.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Checks a DER signature over the SHA-256 digest of `message`.
    ///
    /// Returns `false` for any signature that does not verify, including
    /// bytes that do not decode as DER at all.
    pub fn verify_sha256(&self, signature: &[u8], message: &[u8]) -> bool {
        match Signature::from_der(signature) {
            Ok(signature) => self.0.verify(message, &signature).is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "secp256r1::PublicKey({})",
            hex::encode(self.0.to_encoded_point(false).as_bytes())
        )
    }
}

/// An ECDSA private key on secp256r1.
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    /// Signs the SHA-256 digest of `message`, returning the DER signature.
    pub fn sign_sha256(&self, message: &[u8]) -> Vec<u8> {
        let signature: Signature = self.0.sign(message);
        signature.to_der().as_bytes().to_vec()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "secp256r1::PrivateKey(<secret>)")
    }
}
