//! Transaction Module
//!
//! Messages, transactions, SignDoc reconstruction and the chain-bound
//! validation pipeline.

mod message;
mod transaction;
mod validator;

pub use message::*;
pub use transaction::*;
pub use validator::*;
