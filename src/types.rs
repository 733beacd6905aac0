//! Shared types for the signing core
//!
//! Value types that cross module boundaries (transactions, SignDocs and
//! authorities all refer to them) are defined here.

use crate::error::{PunnetError, PunnetResult};
use crate::signdoc::MAX_FEE_COINS;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Maximum length of an account name in bytes
pub const MAX_ACCOUNT_NAME_LENGTH: usize = 64;

/// Maximum length of a coin denomination in bytes
pub const MAX_DENOM_LENGTH: usize = 64;

// =============================================================================
// Account Names
// =============================================================================

/// Human-readable account identifier
///
/// Valid names are 1..=64 characters drawn from `[a-z0-9.]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self.0.len() <= MAX_ACCOUNT_NAME_LENGTH
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.')
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// =============================================================================
// Coins
// =============================================================================

/// A single token amount
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u64,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.denom.is_empty() && self.denom.len() <= MAX_DENOM_LENGTH
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Ordered collection of coins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(pub Vec<Coin>);

impl Coins {
    pub fn new(coins: Vec<Coin>) -> Self {
        Self(coins)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    /// Every coin valid, denominations unique and strictly ascending
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(Coin::is_valid)
            && self.0.windows(2).all(|pair| pair[0].denom < pair[1].denom)
    }

    pub fn amount_of(&self, denom: &str) -> u64 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join(","))
    }
}

// =============================================================================
// Fee & Slippage
// =============================================================================

/// Transaction fee with gas limit
///
/// Coins in `amount` must have unique denominations; a repeated denom would
/// leave downstream fee accounting ambiguous about which amount wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Coins,
    pub gas_limit: u64,
}

impl Fee {
    pub fn new(amount: Vec<Coin>, gas_limit: u64) -> Self {
        Self {
            amount: Coins::new(amount),
            gas_limit,
        }
    }

    pub fn validate_basic(&self) -> PunnetResult<()> {
        if self.amount.len() > MAX_FEE_COINS {
            return Err(PunnetError::invalid_coin(format!(
                "too many fee coins ({} > {})",
                self.amount.len(),
                MAX_FEE_COINS
            )));
        }

        let mut seen = HashSet::with_capacity(self.amount.len());
        for (i, coin) in self.amount.iter().enumerate() {
            if !coin.is_valid() {
                return Err(PunnetError::invalid_coin(format!(
                    "fee coin {}: invalid (empty or oversized denom)",
                    i
                )));
            }
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

/// Fraction used for fee slippage tolerance (e.g. 1/100 = 1%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    pub numerator: u64,
    pub denominator: u64,
}

impl Ratio {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn validate_basic(&self) -> PunnetResult<()> {
        if self.denominator == 0 {
            return Err(PunnetError::invalid_transaction("denominator cannot be zero"));
        }
        Ok(())
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::new(0, 1)
    }
}
