//! Accounts and Authorities
//!
//! An account's authority is a weighted threshold policy over public keys
//! and delegated accounts. Maps are ordered so iteration, serialization and
//! error reporting are deterministic.

use crate::error::{PunnetError, PunnetResult};
use crate::serde_bytes::hex_key_map;
use crate::types::AccountName;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Weighted threshold policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub threshold: u64,
    #[serde(with = "hex_key_map")]
    pub key_weights: BTreeMap<Vec<u8>, u64>,
    #[serde(default)]
    pub account_weights: BTreeMap<AccountName, u64>,
}

impl Authority {
    /// Authority with a single key
    pub fn new(threshold: u64, pub_key: impl Into<Vec<u8>>, weight: u64) -> Self {
        Self::with_threshold(threshold).with_key(pub_key, weight)
    }

    /// Authority with no keys or delegates yet
    pub fn with_threshold(threshold: u64) -> Self {
        Self {
            threshold,
            ..Default::default()
        }
    }

    pub fn with_key(mut self, pub_key: impl Into<Vec<u8>>, weight: u64) -> Self {
        self.key_weights.insert(pub_key.into(), weight);
        self
    }

    pub fn with_account(mut self, account: impl Into<AccountName>, weight: u64) -> Self {
        self.account_weights.insert(account.into(), weight);
        self
    }

    /// Threshold non-zero and reachable, delegate names valid
    pub fn validate_basic(&self) -> PunnetResult<()> {
        if self.threshold == 0 {
            return Err(PunnetError::invalid_authority("threshold cannot be zero"));
        }

        let total = self
            .total_possible_weight()
            .ok_or_else(|| PunnetError::invalid_authority("total weight overflow"))?;
        if total < self.threshold {
            return Err(PunnetError::invalid_authority(format!(
                "threshold {} exceeds total weight {}",
                self.threshold, total
            )));
        }

        if let Some(bad) = self.account_weights.keys().find(|a| !a.is_valid()) {
            return Err(PunnetError::invalid_authority(format!(
                "invalid delegated account {}",
                bad
            )));
        }

        Ok(())
    }

    pub fn has_key(&self, pub_key: &[u8]) -> bool {
        self.key_weights.contains_key(pub_key)
    }

    /// Weight of `pub_key`, zero if absent
    pub fn key_weight(&self, pub_key: &[u8]) -> u64 {
        self.key_weights.get(pub_key).copied().unwrap_or(0)
    }

    pub fn has_account(&self, account: &AccountName) -> bool {
        self.account_weights.contains_key(account)
    }

    /// Weight of delegate `account`, zero if absent
    pub fn account_weight(&self, account: &AccountName) -> u64 {
        self.account_weights.get(account).copied().unwrap_or(0)
    }

    /// `None` on overflow
    pub fn total_key_weight(&self) -> Option<u64> {
        checked_sum(self.key_weights.values())
    }

    /// `None` on overflow
    pub fn total_account_weight(&self) -> Option<u64> {
        checked_sum(self.account_weights.values())
    }

    /// `None` on overflow
    pub fn total_possible_weight(&self) -> Option<u64> {
        self.total_key_weight()?.checked_add(self.total_account_weight()?)
    }
}

fn checked_sum<'a>(mut weights: impl Iterator<Item = &'a u64>) -> Option<u64> {
    weights.try_fold(0u64, |acc, w| acc.checked_add(*w))
}

/// A named account with its authority policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: AccountName,
    pub authority: Authority,
    /// Next expected transaction nonce
    #[serde(default)]
    pub nonce: u64,
}

impl Account {
    /// Account controlled by a single key, threshold 1
    pub fn new(name: impl Into<AccountName>, pub_key: impl Into<Vec<u8>>) -> Self {
        Self::with_authority(name, Authority::new(1, pub_key, 1))
    }

    pub fn with_authority(name: impl Into<AccountName>, authority: Authority) -> Self {
        Self {
            name: name.into(),
            authority,
            nonce: 0,
        }
    }

    pub fn validate_basic(&self) -> PunnetResult<()> {
        if !self.name.is_valid() {
            return Err(PunnetError::invalid_account(self.name.to_string()));
        }
        self.authority.validate_basic()
    }
}

// =============================================================================
// Account lookup
// =============================================================================

/// Storage-layer lookup used to resolve delegated accounts
///
/// Treated as synchronous and side-effect free by the verifier. Missing
/// accounts must be reported as `ErrorCode::AccountNotFound`.
pub trait AccountGetter {
    fn get_account(&self, name: &AccountName) -> PunnetResult<Account>;
}

impl AccountGetter for HashMap<AccountName, Account> {
    fn get_account(&self, name: &AccountName) -> PunnetResult<Account> {
        self.get(name)
            .cloned()
            .ok_or_else(|| PunnetError::account_not_found(name))
    }
}

impl AccountGetter for BTreeMap<AccountName, Account> {
    fn get_account(&self, name: &AccountName) -> PunnetResult<Account> {
        self.get(name)
            .cloned()
            .ok_or_else(|| PunnetError::account_not_found(name))
    }
}

impl<G: AccountGetter> AccountGetter for RwLock<G> {
    fn get_account(&self, name: &AccountName) -> PunnetResult<Account> {
        let guard = self
            .read()
            .map_err(|_| PunnetError::internal("account store lock poisoned"))?;
        guard.get_account(name)
    }
}

impl<G: AccountGetter + ?Sized> AccountGetter for Arc<G> {
    fn get_account(&self, name: &AccountName) -> PunnetResult<Account> {
        (**self).get_account(name)
    }
}

impl<G: AccountGetter + ?Sized> AccountGetter for &G {
    fn get_account(&self, name: &AccountName) -> PunnetResult<Account> {
        (**self).get_account(name)
    }
}
