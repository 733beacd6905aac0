//! Transaction Messages
//!
//! A message is one state-changing action inside a transaction. Messages
//! that can describe their own canonical JSON payload have that payload
//! signed in full; the rest fall back to signing only their signer list.

use crate::error::{PunnetError, PunnetResult};
use crate::signdoc::escape_json_string;
use crate::types::{AccountName, Coin};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message carried by a transaction
pub trait Message: fmt::Debug + Send + Sync {
    /// Type identifier, e.g. `/punnet.bank.v1.MsgSend`
    fn msg_type(&self) -> &str;

    /// Stateless validation
    fn validate_basic(&self) -> PunnetResult<()>;

    /// Accounts that must authorize this message
    fn signers(&self) -> Vec<AccountName>;

    /// Canonical compact JSON of the full message content
    ///
    /// `None` selects the signers-only fallback, under which signatures do
    /// not bind amounts, recipients or any other field.
    fn sign_doc_data(&self) -> Option<PunnetResult<Vec<u8>>> {
        None
    }
}

/// Message type of [`MsgSend`]
pub const TYPE_MSG_SEND: &str = "/punnet.bank.v1.MsgSend";

/// Transfer coins from one account to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Coin,
}

impl MsgSend {
    pub fn new(from: impl Into<AccountName>, to: impl Into<AccountName>, amount: Coin) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

impl Message for MsgSend {
    fn msg_type(&self) -> &str {
        TYPE_MSG_SEND
    }

    fn validate_basic(&self) -> PunnetResult<()> {
        if !self.from.is_valid() {
            return Err(PunnetError::invalid_account(format!("invalid sender account {}", self.from)));
        }
        if !self.to.is_valid() {
            return Err(PunnetError::invalid_account(format!("invalid recipient account {}", self.to)));
        }
        if self.from == self.to {
            return Err(PunnetError::invalid_message("cannot send to self"));
        }
        if !self.amount.is_valid() {
            return Err(PunnetError::invalid_coin("invalid amount"));
        }
        if !self.amount.is_positive() {
            return Err(PunnetError::invalid_coin("amount must be positive"));
        }
        Ok(())
    }

    fn signers(&self) -> Vec<AccountName> {
        vec![self.from.clone()]
    }

    /// `{"from":..,"to":..,"amount":"<u64>","denom":..}`
    fn sign_doc_data(&self) -> Option<PunnetResult<Vec<u8>>> {
        let data = format!(
            r#"{{"from":{},"to":{},"amount":"{}","denom":{}}}"#,
            escape_json_string(self.from.as_str()),
            escape_json_string(self.to.as_str()),
            self.amount.amount,
            escape_json_string(&self.amount.denom),
        );
        Some(Ok(data.into_bytes()))
    }
}
