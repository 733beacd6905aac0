//! Transaction Validation Pipeline
//!
//! Chain-bound checks run at the three points a transaction passes through:
//! - `validate_transaction`: structure, replay protection, SignDoc roundtrip
//! - `validate_for_mempool`: cheap admission checks, no signature work
//! - `validate_for_block_proposal`: everything, including signatures

use super::transaction::{canonical_roundtrip, Transaction};
use crate::auth::{Account, AccountGetter, AuthorizationVerifier};
use crate::config::SigningConfig;
use crate::crypto::sha256;
use crate::error::{PunnetError, PunnetResult};
use crate::signdoc::{validate_sign_doc_version, SignDoc};
use crate::utils::deprecation::DeprecationTracker;

/// Nonce must equal the expected sequence on a non-empty chain
pub fn validate_replay_protection(
    tx: &Transaction,
    chain_id: &str,
    expected_sequence: u64,
) -> PunnetResult<()> {
    if chain_id.is_empty() {
        return Err(PunnetError::invalid_transaction("chain id cannot be empty"));
    }
    if tx.nonce != expected_sequence {
        return Err(PunnetError::sequence_mismatch(format!(
            "expected {}, got {}",
            expected_sequence, tx.nonce
        )));
    }
    Ok(())
}

/// Version check followed by full SignDoc validation
pub fn validate_sign_doc(doc: &SignDoc) -> PunnetResult<()> {
    validate_sign_doc_version(&doc.version)?;
    doc.validate_basic()
}

/// Validator bound to one chain
#[derive(Debug)]
pub struct TransactionValidator {
    chain_id: String,
    verifier: AuthorizationVerifier,
    tracker: DeprecationTracker,
}

impl TransactionValidator {
    /// Validator with the standard configuration
    pub fn new(chain_id: impl Into<String>) -> PunnetResult<Self> {
        Self::with_config(chain_id, &SigningConfig::standard())
    }

    pub fn with_config(chain_id: impl Into<String>, config: &SigningConfig) -> PunnetResult<Self> {
        let chain_id = chain_id.into();
        if chain_id.is_empty() {
            return Err(PunnetError::missing_argument("chain id cannot be empty"));
        }
        Ok(Self {
            chain_id,
            verifier: config.verifier(),
            tracker: config.deprecation_tracker(),
        })
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn deprecation_tracker(&self) -> &DeprecationTracker {
        &self.tracker
    }

    /// Structure, version, replay protection and SignDoc roundtrip
    pub fn validate_transaction(&self, tx: &Transaction, account: &Account) -> PunnetResult<()> {
        self.canonical_bytes(tx, account).map(|_| ())
    }

    /// Admission check: future nonces are allowed, stale ones are not
    pub fn validate_for_mempool(&self, tx: &Transaction, account: &Account) -> PunnetResult<()> {
        tx.validate_basic()?;

        let doc = self.rebuild(tx, account)?;
        validate_sign_doc_version(&doc.version)?;

        if doc.chain_id != self.chain_id {
            return Err(PunnetError::chain_id_mismatch(format!(
                "expected {:?}, got {:?}",
                self.chain_id, doc.chain_id
            )));
        }

        if tx.nonce < account.nonce {
            return Err(PunnetError::sequence_mismatch(format!(
                "transaction nonce {} is behind account nonce {}",
                tx.nonce, account.nonce
            )));
        }

        Ok(())
    }

    /// Full validation plus authorization verification
    pub fn validate_for_block_proposal<G>(
        &self,
        tx: &Transaction,
        account: &Account,
        getter: &G,
    ) -> PunnetResult<()>
    where
        G: AccountGetter + ?Sized,
    {
        let canonical = self.canonical_bytes(tx, account)?;
        self.verifier
            .verify(&tx.authorization, account, &sha256(&canonical), getter)
    }

    /// Validated canonical encoding of the rebuilt SignDoc
    ///
    /// The SignDoc is rebuilt exactly once per call.
    fn canonical_bytes(&self, tx: &Transaction, account: &Account) -> PunnetResult<Vec<u8>> {
        tx.validate_basic()?;

        let doc = self.rebuild(tx, account)?;
        validate_sign_doc_version(&doc.version)?;
        validate_replay_protection(tx, &self.chain_id, account.nonce)?;
        canonical_roundtrip(&doc)
    }

    fn rebuild(&self, tx: &Transaction, account: &Account) -> PunnetResult<SignDoc> {
        tx.to_sign_doc(&self.chain_id, account.nonce, &self.tracker)
            .map_err(|e| {
                PunnetError::invalid_transaction(format!("failed to reconstruct SignDoc: {}", e.message))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Authorization, Ed25519Signer, Signature, Signer};
    use crate::crypto::Algorithm;
    use crate::error::ErrorCode;
    use crate::tx::{Message, MsgSend};
    use crate::types::{AccountName, Coin};
    use std::collections::HashMap;

    const CHAIN: &str = "punnet-test-1";

    fn setup(nonce: u64) -> (Transaction, Account) {
        let signer = Ed25519Signer::from_label("validator-test").unwrap();
        let mut account = Account::new("alice", signer.public_key());
        account.nonce = nonce;

        let mut tx = Transaction::new(
            "alice",
            nonce,
            vec![Box::new(MsgSend::new("alice", "bob", Coin::new("stake", 10)))],
            Authorization::default(),
        );
        let doc = tx.to_sign_doc(CHAIN, nonce, &DeprecationTracker::silent()).unwrap();
        let sig = signer.sign(&doc.sign_bytes()).unwrap();
        tx.authorization = Authorization::new(vec![Signature::new(Algorithm::Ed25519, signer.public_key(), sig)]);
        (tx, account)
    }

    #[test]
    fn test_new_requires_chain_id() {
        assert_eq!(TransactionValidator::new("").unwrap_err().code, ErrorCode::MissingArgument);
        assert_eq!(TransactionValidator::new(CHAIN).unwrap().chain_id(), CHAIN);
    }

    #[test]
    fn test_replay_protection() {
        let (tx, _) = setup(5);
        assert!(validate_replay_protection(&tx, CHAIN, 5).is_ok());
        assert_eq!(
            validate_replay_protection(&tx, CHAIN, 6).unwrap_err().code,
            ErrorCode::SequenceMismatch
        );
        assert_eq!(
            validate_replay_protection(&tx, "", 5).unwrap_err().code,
            ErrorCode::InvalidTransaction
        );
    }

    #[test]
    fn test_validate_sign_doc() {
        let mut doc = SignDoc::new(CHAIN, 1, "alice", 1, "");
        doc.add_message("/punnet.bank.v1.MsgSend", Some(br#"{"a":1}"#.to_vec()));
        assert!(validate_sign_doc(&doc).is_ok());

        doc.version = "2".to_string();
        assert_eq!(validate_sign_doc(&doc).unwrap_err().code, ErrorCode::UnsupportedVersion);
    }

    #[test]
    fn test_validate_transaction() {
        let validator = TransactionValidator::new(CHAIN).unwrap();
        let (tx, mut account) = setup(2);
        assert!(validator.validate_transaction(&tx, &account).is_ok());

        account.nonce = 3;
        assert_eq!(
            validator.validate_transaction(&tx, &account).unwrap_err().code,
            ErrorCode::SequenceMismatch
        );
    }

    #[test]
    fn test_mempool_allows_future_nonce() {
        let validator = TransactionValidator::new(CHAIN).unwrap();
        let (tx, mut account) = setup(5);

        account.nonce = 3;
        assert!(validator.validate_for_mempool(&tx, &account).is_ok());

        account.nonce = 6;
        assert_eq!(
            validator.validate_for_mempool(&tx, &account).unwrap_err().code,
            ErrorCode::SequenceMismatch
        );
    }

    #[test]
    fn test_block_proposal_verifies_signatures() {
        let validator = TransactionValidator::new(CHAIN).unwrap();
        let getter: HashMap<AccountName, Account> = HashMap::new();
        let (tx, account) = setup(0);
        assert!(validator.validate_for_block_proposal(&tx, &account, &getter).is_ok());

        let other_chain = TransactionValidator::new("punnet-other-1").unwrap();
        assert!(other_chain.validate_for_mempool(&tx, &account).is_ok());
        assert_eq!(
            other_chain
                .validate_for_block_proposal(&tx, &account, &getter)
                .unwrap_err()
                .code,
            ErrorCode::InvalidSignature
        );
    }

    #[derive(Debug)]
    struct SignersOnly;

    impl Message for SignersOnly {
        fn msg_type(&self) -> &str {
            "/test.v1.SignersOnly"
        }
        fn validate_basic(&self) -> PunnetResult<()> {
            Ok(())
        }
        fn signers(&self) -> Vec<AccountName> {
            vec![AccountName::from("alice")]
        }
    }

    #[test]
    fn test_fallback_warned_once_per_validation() {
        let validator = TransactionValidator::with_config(CHAIN, &SigningConfig::strict()).unwrap();
        let signer = Ed25519Signer::from_label("validator-test").unwrap();
        let account = Account::new("alice", signer.public_key());

        let mut tx = Transaction::new("alice", 0, vec![Box::new(SignersOnly)], Authorization::default());
        let doc = tx.to_sign_doc(CHAIN, 0, &DeprecationTracker::silent()).unwrap();
        let sig = signer.sign(&doc.sign_bytes()).unwrap();
        tx.authorization = Authorization::new(vec![Signature::new(Algorithm::Ed25519, signer.public_key(), sig)]);

        let tracker = validator.deprecation_tracker();
        validator.validate_transaction(&tx, &account).unwrap();
        assert_eq!(tracker.warnings_emitted(), 1);

        let getter: HashMap<AccountName, Account> = HashMap::new();
        validator.validate_for_block_proposal(&tx, &account, &getter).unwrap();
        assert_eq!(tracker.warnings_emitted(), 2);
    }
}
