//! SignDoc Validation
//!
//! Stateless checks that must pass before sign bytes are trusted. All
//! failures are hard errors; nothing is silently normalized.

use super::types::*;
use super::{
    MAX_FEE_COINS, MAX_MESSAGES_PER_SIGN_DOC, MAX_MESSAGE_DATA_SIZE, SUPPORTED_SIGN_DOC_VERSIONS,
};
use crate::error::{PunnetError, PunnetResult};
use crate::types::MAX_DENOM_LENGTH;
use std::collections::HashSet;

/// Check that a version string is one this build understands
pub fn validate_sign_doc_version(version: &str) -> PunnetResult<()> {
    if SUPPORTED_SIGN_DOC_VERSIONS.contains(&version) {
        return Ok(());
    }
    Err(PunnetError::unsupported_version(format!(
        "{:?} (supported: {:?})",
        version, SUPPORTED_SIGN_DOC_VERSIONS
    )))
}

/// True if `s` is already in Unicode Normalization Form C
///
/// Composed and decomposed spellings of the same text look identical but
/// hash differently, so only the composed form is accepted.
pub fn is_nfc_normalized(s: &str) -> bool {
    unicode_normalization::is_nfc(s)
}

/// True if `data` has no whitespace outside string literals
pub fn is_compact_json(data: &[u8]) -> bool {
    let mut in_string = false;
    let mut escape = false;

    for &b in data {
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            match b {
                b'\\' => escape = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b' ' | b'\t' | b'\n' | b'\r' => return false,
            _ => {}
        }
    }

    true
}

/// Parse a non-negative decimal integer: ASCII digits only, no sign, no
/// surrounding whitespace, must fit in u64
pub fn parse_decimal_u64(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn non_nfc(field: &str) -> PunnetError {
    PunnetError::sign_doc_mismatch(format!("{} is not Unicode NFC-normalized", field))
        .with_details("normalize input to NFC before signing")
}

impl SignDoc {
    /// Stateless structural validation
    pub fn validate_basic(&self) -> PunnetResult<()> {
        validate_sign_doc_version(&self.version)?;

        if self.chain_id.is_empty() {
            return Err(PunnetError::sign_doc_mismatch("chain_id cannot be empty"));
        }
        if self.account.is_empty() {
            return Err(PunnetError::sign_doc_mismatch("account cannot be empty"));
        }

        if !is_nfc_normalized(&self.chain_id) {
            return Err(non_nfc("chain_id"));
        }
        if !is_nfc_normalized(&self.account) {
            return Err(non_nfc("account"));
        }
        if !is_nfc_normalized(&self.memo) {
            return Err(non_nfc("memo"));
        }

        if self.messages.is_empty() {
            return Err(PunnetError::sign_doc_mismatch(
                "SignDoc must contain at least one message",
            ));
        }
        if self.messages.len() > MAX_MESSAGES_PER_SIGN_DOC {
            return Err(PunnetError::sign_doc_mismatch(format!(
                "too many messages ({} > {})",
                self.messages.len(),
                MAX_MESSAGES_PER_SIGN_DOC
            )));
        }

        for (i, msg) in self.messages.iter().enumerate() {
            msg.validate_basic()
                .map_err(|e| PunnetError::sign_doc_mismatch(format!("message {}: {}", i, e.message)))?;
        }

        self.fee
            .validate_basic()
            .map_err(|e| PunnetError::sign_doc_mismatch(format!("invalid fee: {}", e.message)))?;
        self.fee_slippage.validate_basic().map_err(|e| {
            PunnetError::sign_doc_mismatch(format!("invalid fee_slippage: {}", e.message))
        })?;

        Ok(())
    }
}

impl SignDocMessage {
    pub fn validate_basic(&self) -> PunnetResult<()> {
        if self.msg_type.is_empty() {
            return Err(PunnetError::invalid_message("empty type"));
        }
        if !is_nfc_normalized(&self.msg_type) {
            return Err(PunnetError::invalid_message("type is not Unicode NFC-normalized"));
        }

        let Some(data) = &self.data else {
            return Ok(());
        };
        if data.len() > MAX_MESSAGE_DATA_SIZE {
            return Err(PunnetError::invalid_message(format!(
                "data too large ({} > {})",
                data.len(),
                MAX_MESSAGE_DATA_SIZE
            )));
        }
        if !is_compact_json(data) {
            return Err(PunnetError::invalid_message(
                "data is not compact JSON (contains whitespace outside strings)",
            ));
        }
        if serde_json::from_slice::<serde::de::IgnoredAny>(data).is_err() {
            return Err(PunnetError::invalid_message("data is not valid JSON"));
        }
        Ok(())
    }
}

impl SignDocFee {
    pub fn validate_basic(&self) -> PunnetResult<()> {
        if self.gas_limit.is_empty() {
            return Err(PunnetError::invalid_coin("gas_limit cannot be empty"));
        }
        if parse_decimal_u64(&self.gas_limit).is_none() {
            return Err(PunnetError::invalid_coin(format!(
                "invalid gas_limit {:?}: must be a decimal string",
                self.gas_limit
            )));
        }

        if self.amount.len() > MAX_FEE_COINS {
            return Err(PunnetError::invalid_coin(format!(
                "too many fee coins ({} > {})",
                self.amount.len(),
                MAX_FEE_COINS
            )));
        }

        let mut seen = HashSet::with_capacity(self.amount.len());
        for (i, coin) in self.amount.iter().enumerate() {
            coin.validate_basic().map_err(|e| {
                PunnetError::invalid_coin(format!("fee coin {}: {}", i, e.message))
            })?;
            if !seen.insert(coin.denom.as_str()) {
                return Err(PunnetError::invalid_coin(format!(
                    "fee coin {}: duplicate denomination {:?}",
                    i, coin.denom
                )));
            }
        }

        Ok(())
    }
}

impl SignDocRatio {
    pub fn validate_basic(&self) -> PunnetResult<()> {
        if self.numerator.is_empty() {
            return Err(PunnetError::invalid_transaction("numerator cannot be empty"));
        }
        if parse_decimal_u64(&self.numerator).is_none() {
            return Err(PunnetError::invalid_transaction(format!(
                "invalid numerator {:?}: must be a decimal string",
                self.numerator
            )));
        }

        if self.denominator.is_empty() {
            return Err(PunnetError::invalid_transaction("denominator cannot be empty"));
        }
        match parse_decimal_u64(&self.denominator) {
            None => Err(PunnetError::invalid_transaction(format!(
                "invalid denominator {:?}: must be a decimal string",
                self.denominator
            ))),
            Some(0) => Err(PunnetError::invalid_transaction("denominator cannot be zero")),
            Some(_) => Ok(()),
        }
    }
}

impl SignDocCoin {
    pub fn validate_basic(&self) -> PunnetResult<()> {
        if self.denom.is_empty() {
            return Err(PunnetError::invalid_coin("denom cannot be empty"));
        }
        if self.denom.len() > MAX_DENOM_LENGTH {
            return Err(PunnetError::invalid_coin(format!(
                "denom too long ({} > {})",
                self.denom.len(),
                MAX_DENOM_LENGTH
            )));
        }
        if !is_nfc_normalized(&self.denom) {
            return Err(PunnetError::invalid_coin("denom is not Unicode NFC-normalized"));
        }
        if self.amount.is_empty() {
            return Err(PunnetError::invalid_coin("amount cannot be empty"));
        }
        if parse_decimal_u64(&self.amount).is_none() {
            return Err(PunnetError::invalid_coin(format!(
                "invalid amount {:?}: must be a decimal string",
                self.amount
            )));
        }
        Ok(())
    }
}
