//! Transactions
//!
//! A transaction never carries its SignDoc. Verifiers rebuild the SignDoc
//! from the transaction fields, check that its canonical encoding survives a
//! parse/re-serialize roundtrip byte for byte, and verify signatures against
//! the SHA-256 of those bytes.

use super::message::Message;
use crate::auth::{Account, AccountGetter, Authorization, AuthorizationVerifier};
use crate::crypto::sha256;
use crate::error::{PunnetError, PunnetResult};
use crate::signdoc::{
    canonical_sorted_object, parse_sign_doc, SignDoc, SignDocFee, SignDocMessage, SignDocRatio,
};
use crate::types::{AccountName, Fee, Ratio};
use crate::utils::deprecation::DeprecationTracker;
use crate::log_debug;
use std::collections::HashMap;

/// Maximum memo length in bytes
pub const MAX_MEMO_LENGTH: usize = 512;

const MODULE: &str = "tx::transaction";

#[derive(Debug)]
pub struct Transaction {
    pub account: AccountName,
    /// Ordered; order is signed
    pub messages: Vec<Box<dyn Message>>,
    pub authorization: Authorization,
    pub nonce: u64,
    pub memo: String,
    pub fee: Fee,
    /// Maximum conversion-rate slippage accepted when paying the fee
    pub fee_slippage: Ratio,
}

impl Transaction {
    pub fn new(
        account: impl Into<AccountName>,
        nonce: u64,
        messages: Vec<Box<dyn Message>>,
        authorization: Authorization,
    ) -> Self {
        Self {
            account: account.into(),
            messages,
            authorization,
            nonce,
            memo: String::new(),
            fee: Fee::default(),
            fee_slippage: Ratio::default(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_fee(mut self, fee: Fee, fee_slippage: Ratio) -> Self {
        self.fee = fee;
        self.fee_slippage = fee_slippage;
        self
    }

    /// Stateless validation; every failure is `InvalidTransaction` except
    /// a malformed account name
    pub fn validate_basic(&self) -> PunnetResult<()> {
        if !self.account.is_valid() {
            return Err(PunnetError::invalid_account(self.account.to_string()));
        }

        if self.messages.is_empty() {
            return Err(PunnetError::invalid_transaction(
                "transaction must have at least one message",
            ));
        }

        self.authorization
            .validate_basic()
            .map_err(|e| PunnetError::invalid_transaction(e.message))?;

        for (i, msg) in self.messages.iter().enumerate() {
            msg.validate_basic().map_err(|e| {
                PunnetError::invalid_transaction(format!("message {}: {}", i, e.message))
            })?;

            if !msg.signers().contains(&self.account) {
                return Err(PunnetError::invalid_transaction(format!(
                    "transaction account {} not in message signers",
                    self.account
                )));
            }
        }

        if self.memo.len() > MAX_MEMO_LENGTH {
            return Err(PunnetError::invalid_transaction(format!(
                "memo exceeds {} bytes",
                MAX_MEMO_LENGTH
            )));
        }

        self.fee
            .validate_basic()
            .map_err(|e| PunnetError::invalid_transaction(format!("invalid fee: {}", e.message)))?;
        self.fee_slippage.validate_basic().map_err(|e| {
            PunnetError::invalid_transaction(format!("invalid fee_slippage: {}", e.message))
        })?;

        Ok(())
    }

    /// Rebuild the SignDoc this transaction's signatures commit to
    ///
    /// Messages without canonical data are reduced to
    /// `{"signers":[...]}` and reported to `tracker`.
    pub fn to_sign_doc(
        &self,
        chain_id: &str,
        account_sequence: u64,
        tracker: &DeprecationTracker,
    ) -> PunnetResult<SignDoc> {
        let mut messages = Vec::with_capacity(self.messages.len());
        for (i, msg) in self.messages.iter().enumerate() {
            let data = match msg.sign_doc_data() {
                Some(Ok(data)) => data,
                Some(Err(e)) => {
                    return Err(PunnetError::invalid_message(format!(
                        "message {} sign doc data failed: {}",
                        i, e.message
                    )))
                }
                None => {
                    tracker.warn_signers_only_fallback(msg.msg_type());
                    let mut fields = HashMap::with_capacity(1);
                    fields.insert("signers", msg.signers());
                    canonical_sorted_object(&fields)?
                }
            };
            messages.push(SignDocMessage::new(msg.msg_type(), Some(data)));
        }

        let mut doc = SignDoc::with_fee(
            chain_id,
            account_sequence,
            self.account.as_str(),
            self.nonce,
            self.memo.as_str(),
            SignDocFee::from(&self.fee),
            SignDocRatio::from(&self.fee_slippage),
        );
        doc.messages = messages;
        Ok(doc)
    }

    /// The rebuilt SignDoc must encode, parse and re-encode to identical
    /// bytes
    pub fn validate_sign_doc_roundtrip(
        &self,
        chain_id: &str,
        account_sequence: u64,
        tracker: &DeprecationTracker,
    ) -> PunnetResult<()> {
        let doc = self.to_sign_doc(chain_id, account_sequence, tracker).map_err(|e| {
            PunnetError::sign_doc_mismatch(format!("SignDoc creation failed: {}", e.message))
        })?;
        canonical_roundtrip(&doc).map(|_| ())
    }

    /// Full authorization check against `account` on `chain_id`
    ///
    /// The SignDoc is rebuilt once; its first encoding is both
    /// roundtrip-checked and hashed into the sign bytes.
    pub fn verify_authorization<G>(
        &self,
        chain_id: &str,
        account: &Account,
        getter: &G,
        verifier: &AuthorizationVerifier,
        tracker: &DeprecationTracker,
    ) -> PunnetResult<()>
    where
        G: AccountGetter + ?Sized,
    {
        if chain_id.is_empty() {
            return Err(PunnetError::invalid_transaction("chain id cannot be empty"));
        }

        if self.nonce != account.nonce {
            return Err(PunnetError::sequence_mismatch(format!(
                "expected nonce {}, got {}",
                account.nonce, self.nonce
            )));
        }

        let doc = self
            .to_sign_doc(chain_id, account.nonce, tracker)
            .map_err(|e| PunnetError::invalid_transaction(e.message))?;
        let canonical = canonical_roundtrip(&doc)?;
        let sign_bytes = sha256(&canonical);

        log_debug!(MODULE, "verifying authorization", account = self.account, sign_bytes = hex::encode(sign_bytes));
        verifier.verify(&self.authorization, account, &sign_bytes, getter)
    }
}

/// Canonical bytes of `doc`, checked for parse/re-serialize stability
pub(crate) fn canonical_roundtrip(doc: &SignDoc) -> PunnetResult<Vec<u8>> {
    let json1 = doc.to_json();
    let parsed = parse_sign_doc(&json1)
        .map_err(|e| PunnetError::sign_doc_mismatch(format!("parsing failed: {}", e.message)))?;
    let json2 = parsed.to_json();

    if json1 != json2 {
        return Err(PunnetError::sign_doc_mismatch(format!(
            "roundtrip produced different bytes (len {} vs {})",
            json1.len(),
            json2.len()
        )));
    }
    Ok(json1)
}
