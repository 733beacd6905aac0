//! Multi-signature Collection
//!
//! Coordinates gathering signatures from several signers over one SignDoc.
//! Every signer signs the same sign bytes; the collected set becomes the
//! top-level [`Authorization`].
//!
//! SECURITY: signer private keys are zeroized on drop and never printed.

use super::authorization::Authorization;
use super::signature::Signature;
use crate::crypto::curves::{Algorithm, Ed25519Curve, EllipticCurve};
use crate::crypto::seed_from_label;
use crate::error::{PunnetError, PunnetResult};
use crate::signdoc::SignDoc;
use crate::log_debug;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use zeroize::{Zeroize, Zeroizing};

const MODULE: &str = "auth::multisign";

/// Something that can sign sign bytes
pub trait Signer {
    fn algorithm(&self) -> Algorithm;
    fn public_key(&self) -> Vec<u8>;
    fn sign(&self, message: &[u8]) -> PunnetResult<Vec<u8>>;
}

/// In-memory Ed25519 signing key
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Ed25519Signer {
    private_key: [u8; 32],
    #[zeroize(skip)]
    public_key: [u8; 32],
}

impl Ed25519Signer {
    /// Signer from a 32-byte seed
    pub fn from_seed(seed: &[u8]) -> PunnetResult<Self> {
        let (private_key, public_key) = Ed25519Curve::generate_keypair(seed)?;
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Deterministic signer from `SHA256(label)`
    pub fn from_label(label: &str) -> PunnetResult<Self> {
        let seed = Zeroizing::new(seed_from_label(label));
        Self::from_seed(seed.as_ref())
    }

    /// Fresh signer from OS randomness
    pub fn generate() -> PunnetResult<Self> {
        let mut seed = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(seed.as_mut());
        Self::from_seed(seed.as_ref())
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.public_key
    }
}

impl fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("public_key", &hex::encode(self.public_key))
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

impl Signer for Ed25519Signer {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Ed25519
    }

    fn public_key(&self) -> Vec<u8> {
        self.public_key.to_vec()
    }

    fn sign(&self, message: &[u8]) -> PunnetResult<Vec<u8>> {
        Ok(Ed25519Curve::sign(&self.private_key, message)?.to_vec())
    }
}

/// Collects signatures for one SignDoc
///
/// Safe to share between threads; each public key may contribute once.
#[derive(Debug)]
pub struct MultiSignCoordinator {
    sign_doc: SignDoc,
    sign_bytes: [u8; 32],
    signatures: RwLock<Vec<Signature>>,
}

impl MultiSignCoordinator {
    pub fn new(sign_doc: SignDoc) -> Self {
        let sign_bytes = sign_doc.sign_bytes();
        Self {
            sign_doc,
            sign_bytes,
            signatures: RwLock::new(Vec::new()),
        }
    }

    pub fn sign_doc(&self) -> &SignDoc {
        &self.sign_doc
    }

    /// Digest every signer must sign
    pub fn sign_bytes(&self) -> [u8; 32] {
        self.sign_bytes
    }

    /// Canonical JSON to hand to remote signers
    pub fn export_sign_doc(&self) -> Vec<u8> {
        self.sign_doc.to_json()
    }

    /// Add a signature after structural validation
    ///
    /// The signature itself is not verified here; see
    /// [`import_signature`](Self::import_signature).
    pub fn add_signature(&self, signature: Signature) -> PunnetResult<()> {
        signature.validate_basic()?;

        let mut signatures = self.write();
        if signatures.iter().any(|s| s.pub_key == signature.pub_key) {
            return Err(PunnetError::duplicate_signature(format!(
                "public key {} already signed",
                hex::encode(&signature.pub_key)
            )));
        }
        signatures.push(signature);
        Ok(())
    }

    /// Sign the sign bytes with `signer` and add the result
    pub fn sign_with(&self, signer: &dyn Signer) -> PunnetResult<()> {
        let signature = signer.sign(&self.sign_bytes)?;
        log_debug!(MODULE, "signed", pub_key = hex::encode(signer.public_key()));
        self.add_signature(Signature::new(signer.algorithm(), signer.public_key(), signature))
    }

    /// Add a signature produced elsewhere; it must verify against the sign
    /// bytes
    pub fn import_signature(
        &self,
        algorithm: Algorithm,
        pub_key: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
    ) -> PunnetResult<()> {
        let signature = Signature::new(algorithm, pub_key, signature);
        signature.validate_basic()?;
        if !signature.verify(&self.sign_bytes) {
            return Err(PunnetError::invalid_signature(
                "imported signature does not verify against sign bytes",
            ));
        }
        self.add_signature(signature)
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Snapshot of the collected signatures
    pub fn signatures(&self) -> Vec<Signature> {
        self.read().clone()
    }

    /// Authorization carrying every collected signature
    pub fn complete(&self) -> Authorization {
        Authorization::new(self.signatures())
    }

    pub fn reset(&self) {
        self.write().clear();
    }

    // A poisoned lock only means another signer panicked mid-push; the Vec
    // itself is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Signature>> {
        self.signatures.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Signature>> {
        self.signatures.write().unwrap_or_else(|p| p.into_inner())
    }
}
