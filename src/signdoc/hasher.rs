//! SignDoc Hashing and Parsing

use super::types::SignDoc;
use crate::crypto::sha256;
use crate::error::{PunnetError, PunnetResult};

impl SignDoc {
    /// The bytes handed to signature algorithms: `SHA256(to_json())`
    pub fn sign_bytes(&self) -> [u8; 32] {
        sha256(&self.to_json())
    }

    /// Canonical byte equality
    pub fn equals(&self, other: &SignDoc) -> bool {
        self.to_json() == other.to_json()
    }
}

/// Parse SignDoc JSON
///
/// Unknown fields are dropped; integer fields must be quoted decimal
/// strings. Malformed input is an error, never a panic.
pub fn parse_sign_doc(data: &[u8]) -> PunnetResult<SignDoc> {
    serde_json::from_slice(data)
        .map_err(|e| PunnetError::parse_error(format!("failed to parse SignDoc: {}", e)))
}
