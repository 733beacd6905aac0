//! Ed25519 Implementation
//!
//! EdDSA signing and verification (RFC 8032). The only production-ready
//! algorithm for transaction authorization.

use super::{CurveError, EllipticCurve};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

/// Ed25519 implementation
pub struct Ed25519Curve;

impl Ed25519Curve {
    pub const PUBLIC_KEY_SIZE: usize = 32;
    pub const SIGNATURE_SIZE: usize = 64;

    fn signing_key(private_key: &[u8]) -> Result<SigningKey, CurveError> {
        let sk_bytes: [u8; 32] = private_key.try_into().map_err(|_| {
            CurveError::InvalidPrivateKey(format!(
                "Private key must be 32 bytes, got {}",
                private_key.len()
            ))
        })?;
        Ok(SigningKey::from_bytes(&sk_bytes))
    }
}

impl EllipticCurve for Ed25519Curve {
    type PrivateKey = [u8; 32];
    type PublicKey = [u8; 32];
    type Signature = [u8; 64];

    fn generate_keypair(seed: &[u8]) -> Result<(Self::PrivateKey, Self::PublicKey), CurveError> {
        if seed.len() < 32 {
            return Err(CurveError::InvalidSeed(format!(
                "Seed must be at least 32 bytes, got {}",
                seed.len()
            )));
        }

        let mut sk_bytes = [0u8; 32];
        sk_bytes.copy_from_slice(&seed[..32]);

        let signing_key = SigningKey::from_bytes(&sk_bytes);
        let verifying_key = signing_key.verifying_key();

        Ok((sk_bytes, verifying_key.to_bytes()))
    }

    fn public_key_from_private(private_key: &[u8]) -> Result<Self::PublicKey, CurveError> {
        let signing_key = Self::signing_key(private_key)?;
        Ok(signing_key.verifying_key().to_bytes())
    }

    fn sign(private_key: &[u8], message: &[u8]) -> Result<Self::Signature, CurveError> {
        let signing_key = Self::signing_key(private_key)?;
        Ok(signing_key.sign(message).to_bytes())
    }

    fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> Result<bool, CurveError> {
        let pk_bytes: [u8; 32] = public_key.try_into().map_err(|_| {
            CurveError::InvalidPublicKey(format!(
                "Public key must be 32 bytes, got {}",
                public_key.len()
            ))
        })?;
        let sig_bytes: [u8; 64] = signature.try_into().map_err(|_| {
            CurveError::InvalidSignature(format!(
                "Signature must be 64 bytes, got {}",
                signature.len()
            ))
        })?;

        let verifying_key = VerifyingKey::from_bytes(&pk_bytes)
            .map_err(|e| CurveError::InvalidPublicKey(e.to_string()))?;
        let sig = Signature::from_bytes(&sig_bytes);

        Ok(verifying_key.verify(message, &sig).is_ok())
    }
}

// MARK: - Tests
