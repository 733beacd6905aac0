//! Signature Algorithm Registry
//!
//! Closed set of signature algorithms that may appear on the wire:
//!
//! - `ed25519`: production-ready, the default
//! - `secp256k1`: reserved, recognized but rejected
//! - `secp256r1`: reserved, recognized but rejected
//!
//! Reserved algorithms are modeled so that their tags parse and produce a
//! distinct "unsupported algorithm" failure instead of falling back to some
//! other scheme. Enabling one is a matter of adding a curve implementation
//! and flipping [`Algorithm::is_production_ready`].
//!
//! # Example
//!
//! ```rust,ignore
//! use punnet_signing::crypto::curves::{Algorithm, sign, verify};
//!
//! let seed = [7u8; 32];
//! let sig = sign(Algorithm::Ed25519, &seed, b"sign bytes")?;
//! let pk = public_key_from_private(Algorithm::Ed25519, &seed)?;
//! assert!(verify(Algorithm::Ed25519, &pk, b"sign bytes", &sig)?);
//! ```

pub mod ed25519;
pub mod traits;

pub use ed25519::Ed25519Curve;
pub use traits::*;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// MARK: - Algorithm Enum

/// Signature algorithms known to the wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    /// Ed25519 (RFC 8032)
    Ed25519,
    /// ECDSA over secp256k1 (reserved)
    Secp256k1,
    /// ECDSA over P-256 (reserved)
    Secp256r1,
}

impl Algorithm {
    /// Wire tag for this algorithm
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1 => "secp256k1",
            Self::Secp256r1 => "secp256r1",
        }
    }

    /// Parse a wire tag. The empty tag means Ed25519.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "" | "ed25519" => Some(Self::Ed25519),
            "secp256k1" => Some(Self::Secp256k1),
            "secp256r1" => Some(Self::Secp256r1),
            _ => None,
        }
    }

    /// Whether signatures under this algorithm may be accepted
    pub fn is_production_ready(&self) -> bool {
        matches!(self, Self::Ed25519)
    }

    /// Public key size in bytes (compressed for the ECDSA curves)
    pub fn public_key_size(&self) -> usize {
        match self {
            Self::Ed25519 => 32,
            Self::Secp256k1 => 33,
            Self::Secp256r1 => 33,
        }
    }

    /// Signature size in bytes
    pub fn signature_size(&self) -> usize {
        64
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Ed25519
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Self::from_tag(&tag)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported signature algorithm {:?}", tag)))
    }
}

/// Algorithms whose signatures are accepted today
pub fn valid_algorithms() -> &'static [Algorithm] {
    &[Algorithm::Ed25519]
}

// MARK: - Curve Errors

/// Errors that can occur during curve operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl From<CurveError> for crate::error::PunnetError {
    fn from(e: CurveError) -> Self {
        use crate::error::PunnetError;
        match e {
            CurveError::InvalidPublicKey(_) => PunnetError::invalid_public_key(e.to_string()),
            CurveError::InvalidSignature(_) => PunnetError::invalid_signature(e.to_string()),
            CurveError::UnsupportedAlgorithm(_) => PunnetError::unsupported_algorithm(e.to_string()),
            CurveError::InvalidPrivateKey(_) | CurveError::InvalidSeed(_) => {
                PunnetError::internal(e.to_string())
            }
        }
    }
}

fn unsupported(algorithm: Algorithm) -> CurveError {
    CurveError::UnsupportedAlgorithm(algorithm.tag().to_string())
}

// MARK: - Unified Interface

/// Generate a keypair for the specified algorithm
pub fn generate_keypair(algorithm: Algorithm, seed: &[u8]) -> Result<(Vec<u8>, Vec<u8>), CurveError> {
    match algorithm {
        Algorithm::Ed25519 => {
            let (sk, pk) = Ed25519Curve::generate_keypair(seed)?;
            Ok((sk.to_vec(), pk.to_vec()))
        }
        Algorithm::Secp256k1 | Algorithm::Secp256r1 => Err(unsupported(algorithm)),
    }
}

/// Derive public key from private key
pub fn public_key_from_private(algorithm: Algorithm, private_key: &[u8]) -> Result<Vec<u8>, CurveError> {
    match algorithm {
        Algorithm::Ed25519 => Ok(Ed25519Curve::public_key_from_private(private_key)?.to_vec()),
        Algorithm::Secp256k1 | Algorithm::Secp256r1 => Err(unsupported(algorithm)),
    }
}

/// Sign a message with the specified algorithm
pub fn sign(algorithm: Algorithm, private_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CurveError> {
    match algorithm {
        Algorithm::Ed25519 => Ok(Ed25519Curve::sign(private_key, message)?.to_vec()),
        Algorithm::Secp256k1 | Algorithm::Secp256r1 => Err(unsupported(algorithm)),
    }
}

/// Verify a signature with the specified algorithm
///
/// `message` is passed to the algorithm as-is; sign bytes are already a
/// SHA-256 digest and must not be hashed again here.
pub fn verify(
    algorithm: Algorithm,
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<bool, CurveError> {
    match algorithm {
        Algorithm::Ed25519 => Ed25519Curve::verify(public_key, message, signature),
        Algorithm::Secp256k1 | Algorithm::Secp256r1 => Err(unsupported(algorithm)),
    }
}

// MARK: - Tests
