//! Punnet Signing Core
//!
//! Canonical transaction signing and delegated multi-signature
//! authorization.
//!
//! # Architecture
//!
//! This crate provides:
//! - **signdoc**: canonical SignDoc encoding, validation and sign bytes
//! - **crypto**: signature algorithm registry (Ed25519 in production)
//! - **auth**: authorities, authorization proofs and the weight verifier
//! - **tx**: messages, transactions and the validation pipeline
//! - **config**: verifier and deprecation presets
//! - **utils**: structured logging and deprecation tracking
//!
//! # Security
//!
//! Signatures commit to `SHA256(canonical JSON)` of a SignDoc that verifiers
//! always rebuild from transaction fields. Signer keys are zeroized on drop.
//!
//! # Example
//!
//! ```rust,ignore
//! use punnet_signing::auth::{Account, Ed25519Signer, MultiSignCoordinator};
//! use punnet_signing::signdoc::SignDoc;
//!
//! let mut doc = SignDoc::new("punnet-mainnet-1", 0, "alice", 0, "");
//! doc.add_message("/punnet.bank.v1.MsgSend", Some(br#"{"from":"alice"}"#.to_vec()));
//!
//! let signer = Ed25519Signer::generate()?;
//! let coordinator = MultiSignCoordinator::new(doc);
//! coordinator.sign_with(&signer)?;
//!
//! let account = Account::new("alice", signer.public_key_bytes());
//! coordinator
//!     .complete()
//!     .verify_authorization(&account, &coordinator.sign_bytes(), &getter)?;
//! ```

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod serde_bytes;
pub mod signdoc;
pub mod tx;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use auth::{
    Account, AccountGetter, Authority, Authorization, AuthorizationVerifier, DelegateResolution,
    MultiSignCoordinator, Signature,
};
pub use config::SigningConfig;
pub use crypto::Algorithm;
pub use error::{ErrorCode, ErrorKind, PunnetError, PunnetResult};
pub use signdoc::{parse_sign_doc, SignDoc};
pub use tx::{Message, Transaction, TransactionValidator};
pub use types::{AccountName, Coin, Coins, Fee, Ratio};
