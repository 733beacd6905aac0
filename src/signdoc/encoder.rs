//! SignDoc Canonical Encoding
//!
//! Hand-written serializer: fields are emitted in a fixed order, never by
//! iterating a map, and every string goes through [`escape_json_string`].

use super::types::*;
use crate::error::PunnetResult;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Escape a string as a quoted JSON string literal
///
/// `"` and `\` get backslash escapes, `\n` `\r` `\t` their short forms and
/// every other C0 control becomes `\u00xx`. Everything else, including
/// U+2028/U+2029, bidi controls and astral code points, is copied byte for
/// byte.
pub fn escape_json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Escape arbitrary bytes as a JSON string literal
///
/// Invalid UTF-8 sequences are replaced with U+FFFD, so the result is always
/// valid JSON.
pub fn escape_json_bytes(bytes: &[u8]) -> String {
    escape_json_string(&String::from_utf8_lossy(bytes))
}

/// Serialize a JSON object with its keys sorted
///
/// For payloads whose key set is dynamic; fixed shapes are written field by
/// field instead.
pub fn canonical_sorted_object<K, V>(entries: &HashMap<K, V>) -> PunnetResult<Vec<u8>>
where
    K: AsRef<str>,
    V: Serialize,
{
    let mut sorted: Vec<(&K, &V)> = entries.iter().collect();
    sorted.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));

    let mut buf = Vec::with_capacity(64);
    buf.push(b'{');
    for (i, (key, value)) in sorted.into_iter().enumerate() {
        if i > 0 {
            buf.push(b',');
        }
        buf.extend_from_slice(escape_json_string(key.as_ref()).as_bytes());
        buf.push(b':');
        buf.extend_from_slice(&serde_json::to_vec(value)?);
    }
    buf.push(b'}');
    Ok(buf)
}

fn push_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(escape_json_string(s).as_bytes());
}

impl SignDoc {
    /// Canonical compact JSON
    ///
    /// Two SignDocs with identical field values always produce identical
    /// bytes. Unknown fields dropped at parse time are never emitted.
    pub fn to_json(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);

        buf.extend_from_slice(b"{\"version\":");
        push_str(&mut buf, &self.version);
        buf.extend_from_slice(b",\"chain_id\":");
        push_str(&mut buf, &self.chain_id);
        buf.extend_from_slice(b",\"account\":");
        push_str(&mut buf, &self.account);
        buf.extend_from_slice(b",\"account_sequence\":");
        push_str(&mut buf, &self.account_sequence.to_string());

        buf.extend_from_slice(b",\"messages\":[");
        for (i, msg) in self.messages.iter().enumerate() {
            if i > 0 {
                buf.push(b',');
            }
            buf.extend_from_slice(b"{\"type\":");
            push_str(&mut buf, &msg.msg_type);
            buf.extend_from_slice(b",\"data\":");
            match &msg.data {
                Some(data) => buf.extend_from_slice(data),
                None => buf.extend_from_slice(b"null"),
            }
            buf.push(b'}');
        }
        buf.push(b']');

        buf.extend_from_slice(b",\"nonce\":");
        push_str(&mut buf, &self.nonce.to_string());
        buf.extend_from_slice(b",\"memo\":");
        push_str(&mut buf, &self.memo);
        buf.extend_from_slice(b",\"fee\":");
        self.fee.write_json(&mut buf);
        buf.extend_from_slice(b",\"fee_slippage\":");
        self.fee_slippage.write_json(&mut buf);
        buf.push(b'}');

        buf
    }
}

impl SignDocFee {
    fn write_json(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(b"{\"amount\":[");
        for (i, coin) in self.amount.iter().enumerate() {
            if i > 0 {
                buf.push(b',');
            }
            buf.extend_from_slice(b"{\"denom\":");
            push_str(buf, &coin.denom);
            buf.extend_from_slice(b",\"amount\":");
            push_str(buf, &coin.amount);
            buf.push(b'}');
        }
        buf.extend_from_slice(b"],\"gas_limit\":");
        push_str(buf, &self.gas_limit);
        buf.push(b'}');
    }
}

impl SignDocRatio {
    fn write_json(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(b"{\"numerator\":");
        push_str(buf, &self.numerator);
        buf.extend_from_slice(b",\"denominator\":");
        push_str(buf, &self.denominator);
        buf.push(b'}');
    }
}
