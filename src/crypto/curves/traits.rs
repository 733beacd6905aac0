//! Signature Scheme Traits
//!
//! Defines the common interface for signature algorithm implementations.

use super::CurveError;

/// Core trait for signature scheme operations
pub trait EllipticCurve {
    /// The private key type
    type PrivateKey: AsRef<[u8]>;
    /// The public key type
    type PublicKey: AsRef<[u8]>;
    /// The signature type
    type Signature: AsRef<[u8]>;

    /// Generate a keypair from a 32-byte seed
    fn generate_keypair(seed: &[u8]) -> Result<(Self::PrivateKey, Self::PublicKey), CurveError>;

    /// Derive the public key from a private key
    fn public_key_from_private(private_key: &[u8]) -> Result<Self::PublicKey, CurveError>;

    /// Sign a message with a private key
    fn sign(private_key: &[u8], message: &[u8]) -> Result<Self::Signature, CurveError>;

    /// Verify a signature
    ///
    /// Malformed inputs are errors; a well-formed signature that does not
    /// match yields `Ok(false)`.
    fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool, CurveError>;
}
