//! Authorization Proofs
//!
//! An authorization mirrors (part of) an authority graph: signatures for the
//! account's own keys plus nested authorizations for delegated accounts.
//! Entries that the authority does not reference are ignored, not rejected.

use super::account::{Account, AccountGetter};
use super::signature::Signature;
use super::verifier::AuthorizationVerifier;
use crate::error::{PunnetError, PunnetResult};
use crate::types::AccountName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use subtle::ConstantTimeEq;

/// Proof tree submitted to satisfy an account's authority
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(default)]
    pub signatures: Vec<Signature>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub account_authorizations: BTreeMap<AccountName, Authorization>,
}

impl Authorization {
    pub fn new(signatures: Vec<Signature>) -> Self {
        Self {
            signatures,
            account_authorizations: BTreeMap::new(),
        }
    }

    /// Attach a sub-proof for delegated account `name`
    pub fn with_delegation(mut self, name: impl Into<AccountName>, authorization: Authorization) -> Self {
        self.account_authorizations.insert(name.into(), authorization);
        self
    }

    /// Structural validation of the whole tree
    pub fn validate_basic(&self) -> PunnetResult<()> {
        for (i, sig) in self.signatures.iter().enumerate() {
            sig.validate_basic().map_err(|e| {
                PunnetError::invalid_authorization(format!("signature {}: {}", i, e))
            })?;
        }

        for (name, auth) in &self.account_authorizations {
            if !name.is_valid() {
                return Err(PunnetError::invalid_authorization(format!(
                    "invalid account name {}",
                    name
                )));
            }
            auth.validate_basic().map_err(|e| {
                PunnetError::invalid_authorization(format!("account {}: {}", name, e.message))
            })?;
        }

        Ok(())
    }

    /// Every top-level signature must verify against `message`
    pub fn verify_signatures(&self, message: &[u8]) -> PunnetResult<()> {
        match self.signatures.iter().position(|sig| !sig.verify(message)) {
            Some(i) => Err(PunnetError::invalid_signature(format!(
                "signature {} failed verification",
                i
            ))),
            None => Ok(()),
        }
    }

    /// Verify against `account` with the default verifier settings
    pub fn verify_authorization<G>(&self, account: &Account, message: &[u8], getter: &G) -> PunnetResult<()>
    where
        G: AccountGetter + ?Sized,
    {
        AuthorizationVerifier::default().verify(self, account, message, getter)
    }

    /// Public keys of the top-level signatures that verify
    pub fn signed_pub_keys(&self, message: &[u8]) -> Vec<&[u8]> {
        self.signatures
            .iter()
            .filter(|sig| sig.verify(message))
            .map(|sig| sig.pub_key.as_slice())
            .collect()
    }

    /// Whether the first signature carrying `pub_key` verifies
    pub fn has_signature_from(&self, pub_key: &[u8], message: &[u8]) -> bool {
        self.signatures
            .iter()
            .find(|sig| sig.pub_key.len() == pub_key.len() && bool::from(sig.pub_key.ct_eq(pub_key)))
            .map(|sig| sig.verify(message))
            .unwrap_or(false)
    }

    pub fn count_valid_signatures(&self, message: &[u8]) -> usize {
        self.signatures.iter().filter(|sig| sig.verify(message)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::curves::{Algorithm, Ed25519Curve, EllipticCurve};
    use crate::error::ErrorCode;

    fn key(n: u8) -> ([u8; 32], [u8; 32]) {
        Ed25519Curve::generate_keypair(&[n; 32]).unwrap()
    }

    fn sign(n: u8, message: &[u8]) -> Signature {
        let (sk, pk) = key(n);
        let sig = Ed25519Curve::sign(&sk, message).unwrap();
        Signature::new(Algorithm::Ed25519, pk.to_vec(), sig.to_vec())
    }

    #[test]
    fn test_validate_basic_recurses() {
        let inner = Authorization::new(vec![Signature::untagged(vec![0u8; 5], vec![0u8; 64])]);
        let outer = Authorization::new(vec![sign(1, b"m")]).with_delegation("bob", inner);
        let err = outer.validate_basic().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAuthorization);
        assert!(err.message.contains("bob"));

        let bad_name = Authorization::default().with_delegation("Bob!", Authorization::default());
        assert!(bad_name.validate_basic().is_err());
    }

    #[test]
    fn test_verify_signatures_aborts_on_bad_signature() {
        let good = Authorization::new(vec![sign(1, b"m"), sign(2, b"m")]);
        assert!(good.verify_signatures(b"m").is_ok());

        let bad = Authorization::new(vec![sign(1, b"m"), sign(2, b"other")]);
        let err = bad.verify_signatures(b"m").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSignature);
        assert!(err.message.contains("signature 1"));
    }

    #[test]
    fn test_signature_queries() {
        let auth = Authorization::new(vec![sign(1, b"m"), sign(2, b"other"), sign(3, b"m")]);
        assert_eq!(auth.count_valid_signatures(b"m"), 2);

        let signed = auth.signed_pub_keys(b"m");
        assert_eq!(signed.len(), 2);
        assert_eq!(signed[0], &key(1).1[..]);

        assert!(auth.has_signature_from(&key(1).1, b"m"));
        assert!(!auth.has_signature_from(&key(2).1, b"m"));
        assert!(!auth.has_signature_from(&key(4).1, b"m"));
        assert!(!auth.has_signature_from(&[0u8; 3], b"m"));
    }

    #[test]
    fn test_serde_omits_empty_delegations() {
        let auth = Authorization::new(vec![sign(1, b"m")]);
        let json = serde_json::to_string(&auth).unwrap();
        assert!(!json.contains("account_authorizations"));

        let nested = auth.clone().with_delegation("bob", auth);
        let json = serde_json::to_string(&nested).unwrap();
        let back: Authorization = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nested);
    }
}
