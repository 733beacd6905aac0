//! Canonical SignDoc
//!
//! The SignDoc is the document every transaction signature commits to. It is
//! serialized to compact JSON with a fixed field order, and the SHA-256 of
//! those bytes ("sign bytes") is what signers actually sign:
//!
//! ```text
//! {"version":"1","chain_id":..,"account":..,"account_sequence":"42",
//!  "messages":[{"type":..,"data":..}],"nonce":"42","memo":"",
//!  "fee":{"amount":[{"denom":..,"amount":..}],"gas_limit":..},
//!  "fee_slippage":{"numerator":..,"denominator":..}}
//! ```
//!
//! Integers are always quoted decimal strings. Message data is raw JSON
//! written verbatim, so it must already be compact.
//!
//! # Example
//! ```rust,ignore
//! use punnet_signing::signdoc::SignDoc;
//!
//! let mut doc = SignDoc::new("punnet-mainnet-1", 42, "alice", 42, "");
//! doc.add_message("/punnet.bank.v1.MsgSend", Some(br#"{"from":"alice"}"#.to_vec()));
//! doc.validate_basic()?;
//! let sign_bytes = doc.sign_bytes();
//! ```

pub mod encoder;
pub mod hasher;
pub mod types;
pub mod validation;

pub use encoder::*;
pub use hasher::*;
pub use types::*;
pub use validation::*;

/// Current SignDoc format version
pub const SIGN_DOC_VERSION: &str = "1";

/// Every version this build accepts
pub const SUPPORTED_SIGN_DOC_VERSIONS: &[&str] = &[SIGN_DOC_VERSION];

/// Upper bound on messages in one SignDoc
pub const MAX_MESSAGES_PER_SIGN_DOC: usize = 256;

/// Upper bound on the raw JSON data of a single message
pub const MAX_MESSAGE_DATA_SIZE: usize = 64 * 1024;

/// Upper bound on coins in a fee
pub const MAX_FEE_COINS: usize = 16;

#[cfg(test)]
mod tests;
