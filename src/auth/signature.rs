//! Signatures
//!
//! A signature is tagged with its algorithm. Only production-ready
//! algorithms pass validation; reserved ones are recognized on the wire and
//! rejected with a distinct error.

use crate::crypto::curves::{self, Algorithm};
use crate::error::{PunnetError, PunnetResult};
use crate::serde_bytes::base64_vec;
use serde::{Deserialize, Deserializer, Serialize};

/// A single signature over sign bytes
///
/// An `algorithm` tag outside the known set is rejected when the signature
/// is parsed, which fails the enclosing `Authorization` as a whole. Known
/// but unsupported algorithms parse and then verify to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Absent or empty means Ed25519
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_algorithm"
    )]
    pub algorithm: Option<Algorithm>,
    #[serde(with = "base64_vec")]
    pub pub_key: Vec<u8>,
    #[serde(with = "base64_vec")]
    pub signature: Vec<u8>,
}

fn deserialize_algorithm<'de, D>(deserializer: D) -> Result<Option<Algorithm>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(tag) if tag.is_empty() => Ok(None),
        Some(tag) => Algorithm::from_tag(&tag).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("unsupported signature algorithm {:?}", tag))
        }),
    }
}

impl Signature {
    pub fn new(algorithm: Algorithm, pub_key: impl Into<Vec<u8>>, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            algorithm: Some(algorithm),
            pub_key: pub_key.into(),
            signature: signature.into(),
        }
    }

    /// Untagged signature, read as Ed25519
    pub fn untagged(pub_key: impl Into<Vec<u8>>, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            algorithm: None,
            pub_key: pub_key.into(),
            signature: signature.into(),
        }
    }

    /// Effective algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or_default()
    }

    /// Algorithm must be production-ready and key/signature sizes must
    /// match it
    pub fn validate_basic(&self) -> PunnetResult<()> {
        let algorithm = self.algorithm();
        if !algorithm.is_production_ready() {
            return Err(PunnetError::unsupported_algorithm(algorithm.tag()));
        }

        if self.pub_key.len() != algorithm.public_key_size() {
            return Err(PunnetError::invalid_public_key(format!(
                "{} public key must be {} bytes, got {}",
                algorithm,
                algorithm.public_key_size(),
                self.pub_key.len()
            )));
        }
        if self.signature.len() != algorithm.signature_size() {
            return Err(PunnetError::invalid_signature(format!(
                "{} signature must be {} bytes, got {}",
                algorithm,
                algorithm.signature_size(),
                self.signature.len()
            )));
        }
        Ok(())
    }

    /// Verify against `message`
    ///
    /// Any failure, including an unsupported algorithm or a malformed key,
    /// is reported as `false`.
    pub fn verify(&self, message: &[u8]) -> bool {
        if self.validate_basic().is_err() {
            return false;
        }
        curves::verify(self.algorithm(), &self.pub_key, message, &self.signature).unwrap_or(false)
    }
}
