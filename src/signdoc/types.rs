//! SignDoc Types
//!
//! Data structures for the canonical signable document.

use super::SIGN_DOC_VERSION;
use crate::types::{Fee, Ratio};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Unsigned 64-bit integer carried on the wire as a quoted decimal string
///
/// JSON numbers lose precision above 2^53 in many environments, so a bare
/// number is rejected on input and never produced on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringU64(pub u64);

impl StringU64 {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for StringU64 {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl fmt::Display for StringU64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for StringU64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for StringU64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = StringU64;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a quoted decimal string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<StringU64, E> {
                super::validation::parse_decimal_u64(v)
                    .map(StringU64)
                    .ok_or_else(|| E::custom(format!("invalid StringU64 value {:?}", v)))
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

/// A message in canonical form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignDocMessage {
    /// Message type identifier, e.g. `/punnet.bank.v1.MsgSend`
    #[serde(rename = "type")]
    pub msg_type: String,

    /// Raw JSON payload, written verbatim; `None` serializes as `null`
    #[serde(default, deserialize_with = "deserialize_raw_json")]
    pub data: Option<Vec<u8>>,
}

impl SignDocMessage {
    pub fn new(msg_type: impl Into<String>, data: Option<Vec<u8>>) -> Self {
        Self {
            msg_type: msg_type.into(),
            data,
        }
    }
}

// Keeps the exact input bytes of the data value, so parse then serialize
// reproduces them
fn deserialize_raw_json<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Box<serde_json::value::RawValue>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|r| r.get().as_bytes().to_vec()))
}

/// A fee coin with the amount as a decimal string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDocCoin {
    pub denom: String,
    pub amount: String,
}

impl SignDocCoin {
    pub fn new(denom: impl Into<String>, amount: u64) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }
}

/// Fee in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDocFee {
    pub amount: Vec<SignDocCoin>,
    pub gas_limit: String,
}

impl Default for SignDocFee {
    fn default() -> Self {
        Self {
            amount: Vec::new(),
            gas_limit: "0".to_string(),
        }
    }
}

impl From<&Fee> for SignDocFee {
    fn from(fee: &Fee) -> Self {
        Self {
            amount: fee
                .amount
                .iter()
                .map(|c| SignDocCoin::new(c.denom.clone(), c.amount))
                .collect(),
            gas_limit: fee.gas_limit.to_string(),
        }
    }
}

/// Ratio in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignDocRatio {
    pub numerator: String,
    pub denominator: String,
}

impl SignDocRatio {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
        }
    }
}

impl Default for SignDocRatio {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl From<&Ratio> for SignDocRatio {
    fn from(r: &Ratio) -> Self {
        Self::new(r.numerator, r.denominator)
    }
}

/// The canonical document signed for transaction authorization
///
/// Never persisted as a source of truth: verifiers rebuild it from the
/// transaction fields on every attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SignDoc {
    pub version: String,
    /// Binds signatures to one chain
    pub chain_id: String,
    pub account: String,
    /// Expected nonce of the signing account
    pub account_sequence: StringU64,
    /// Ordered; order is part of what is signed
    pub messages: Vec<SignDocMessage>,
    pub nonce: StringU64,
    /// Always serialized, even when empty
    pub memo: String,
    pub fee: SignDocFee,
    pub fee_slippage: SignDocRatio,
}

impl SignDoc {
    /// Create a SignDoc at the current version with no messages, a zero fee
    /// and zero slippage
    pub fn new(
        chain_id: impl Into<String>,
        account_sequence: u64,
        account: impl Into<String>,
        nonce: u64,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            version: SIGN_DOC_VERSION.to_string(),
            chain_id: chain_id.into(),
            account: account.into(),
            account_sequence: StringU64(account_sequence),
            messages: Vec::new(),
            nonce: StringU64(nonce),
            memo: memo.into(),
            fee: SignDocFee::default(),
            fee_slippage: SignDocRatio::default(),
        }
    }

    pub fn with_fee(
        chain_id: impl Into<String>,
        account_sequence: u64,
        account: impl Into<String>,
        nonce: u64,
        memo: impl Into<String>,
        fee: SignDocFee,
        fee_slippage: SignDocRatio,
    ) -> Self {
        let mut doc = Self::new(chain_id, account_sequence, account, nonce, memo);
        doc.fee = fee;
        doc.fee_slippage = fee_slippage;
        doc
    }

    pub fn set_fee(&mut self, fee: SignDocFee) {
        self.fee = fee;
    }

    pub fn set_fee_slippage(&mut self, slippage: SignDocRatio) {
        self.fee_slippage = slippage;
    }

    /// Append a message. `data` is kept byte for byte and must already be
    /// compact JSON with a stable key order.
    pub fn add_message(&mut self, msg_type: impl Into<String>, data: Option<Vec<u8>>) {
        self.messages.push(SignDocMessage::new(msg_type, data));
    }
}
