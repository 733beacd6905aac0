//! Cryptographic primitives for the signing core
//!
//! - SHA-256 helpers used to derive sign bytes and deterministic test keys
//! - Signature algorithm registry (`curves`)

pub mod curves;

pub use curves::{Algorithm, CurveError, Ed25519Curve, EllipticCurve};

use sha2::{Digest, Sha256};

/// SHA-256 of `data`
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a 32-byte seed from a human-readable label
///
/// Used for cross-implementation test vectors, e.g.
/// `seed_from_label("punnet-sdk-test-vector-seed-ed25519")`.
pub fn seed_from_label(label: &str) -> [u8; 32] {
    sha256(label.as_bytes())
}
