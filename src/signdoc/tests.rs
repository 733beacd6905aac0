//! SignDoc Test Suite

use super::*;
use crate::crypto::curves::{Ed25519Curve, EllipticCurve};
use crate::crypto::seed_from_label;
use crate::error::ErrorCode;
use std::collections::HashMap;

const MSG_SEND: &str = "/punnet.bank.v1.MsgSend";
const MSG_SEND_DATA: &[u8] = br#"{"from":"alice","to":"bob","amount":"1000000"}"#;

const REFERENCE_JSON: &str = r#"{"version":"1","chain_id":"punnet-mainnet-1","account":"alice","account_sequence":"42","messages":[{"type":"/punnet.bank.v1.MsgSend","data":{"from":"alice","to":"bob","amount":"1000000"}}],"nonce":"42","memo":"","fee":{"amount":[{"denom":"stake","amount":"5000"}],"gas_limit":"200000"},"fee_slippage":{"numerator":"1","denominator":"100"}}"#;

fn reference_doc() -> SignDoc {
    let mut doc = SignDoc::with_fee(
        "punnet-mainnet-1",
        42,
        "alice",
        42,
        "",
        SignDocFee {
            amount: vec![SignDocCoin::new("stake", 5000)],
            gas_limit: "200000".to_string(),
        },
        SignDocRatio::new(1, 100),
    );
    doc.add_message(MSG_SEND, Some(MSG_SEND_DATA.to_vec()));
    doc
}

// =============================================================================
// Canonical serialization
// =============================================================================

#[test]
fn test_reference_document_bytes() {
    let doc = reference_doc();
    assert!(doc.validate_basic().is_ok());
    assert_eq!(String::from_utf8(doc.to_json()).unwrap(), REFERENCE_JSON);
    assert_eq!(doc.to_json(), doc.to_json());
}

#[test]
fn test_reference_sign_bytes_and_signature() {
    let doc = reference_doc();
    let sign_bytes = doc.sign_bytes();
    assert_eq!(
        hex::encode(sign_bytes),
        "a0d621ab6ee70419f5f4506cf103d9b3feaf5912fc45272f485e06e976aed86d"
    );

    let seed = seed_from_label("punnet-sdk-test-vector-seed-ed25519");
    assert_eq!(
        hex::encode(seed),
        "83d296ed1daa7af61dff0bc6f585237d63133fd15c6acd863a1118313d8b5c89"
    );

    let (sk, pk) = Ed25519Curve::generate_keypair(&seed).unwrap();
    assert_eq!(
        hex::encode(pk),
        "c0db51f52b5f8f655a165d9d936f91a078ef92200787ef95e8d17c207379ee94"
    );

    let sig = Ed25519Curve::sign(&sk, &sign_bytes).unwrap();
    assert_eq!(
        hex::encode(sig),
        "d8598c8529a42218d691f89aa204dc7117a4502314dd02b79632da6cd551ed4836bc131e46eb2102314b9d0a10e6454a116d7973aacd88c953e214e9072fc506"
    );
    assert!(Ed25519Curve::verify(&pk, &sign_bytes, &sig).unwrap());
}

#[test]
fn test_new_sign_doc_defaults() {
    let doc = SignDoc::new("chain", 1, "bob", 2, "hi");
    assert_eq!(doc.version, SIGN_DOC_VERSION);
    assert!(doc.messages.is_empty());
    assert_eq!(
        String::from_utf8(doc.to_json()).unwrap(),
        r#"{"version":"1","chain_id":"chain","account":"bob","account_sequence":"1","messages":[],"nonce":"2","memo":"hi","fee":{"amount":[],"gas_limit":"0"},"fee_slippage":{"numerator":"0","denominator":"1"}}"#
    );
}

#[test]
fn test_null_message_data() {
    let mut doc = SignDoc::new("chain", 0, "bob", 0, "");
    doc.add_message("/test.Msg", None);
    let json = String::from_utf8(doc.to_json()).unwrap();
    assert!(json.contains(r#"{"type":"/test.Msg","data":null}"#));
    assert!(doc.validate_basic().is_ok());

    let parsed = parse_sign_doc(json.as_bytes()).unwrap();
    assert_eq!(parsed.messages[0].data, None);
}

#[test]
fn test_large_integers_stay_strings() {
    let doc = SignDoc::new("chain", u64::MAX, "bob", u64::MAX, "");
    let json = String::from_utf8(doc.to_json()).unwrap();
    assert!(json.contains(r#""account_sequence":"18446744073709551615""#));
    let parsed = parse_sign_doc(json.as_bytes()).unwrap();
    assert_eq!(parsed.account_sequence.get(), u64::MAX);
}

// =============================================================================
// String escaping
// =============================================================================

#[test]
fn test_escape_known_vectors() {
    let vectors = [
        ("hello", r#""hello""#),
        ("\"", r#""\"""#),
        ("\\", r#""\\""#),
        ("\n", r#""\n""#),
        ("\t", r#""\t""#),
        ("\r", r#""\r""#),
        ("\x00", r#""\u0000""#),
        ("\x08", r#""\u0008""#),
        ("\x1f", r#""\u001f""#),
        ("\x7f", "\"\x7f\""),
    ];
    for (input, expected) in vectors {
        assert_eq!(escape_json_string(input), expected, "input {:?}", input);
    }
}

#[test]
fn test_escape_preserves_unicode() {
    for input in ["caf\u{e9}", "e\u{301}", "\u{2028}\u{2029}", "\u{202e}rtl", "\u{1f600}", "日本語"] {
        let escaped = escape_json_string(input);
        assert_eq!(escaped, format!("\"{}\"", input));
        let back: String = serde_json::from_str(&escaped).unwrap();
        assert_eq!(back, input);
    }
}

#[test]
fn test_escape_bytes_invalid_utf8() {
    let escaped = escape_json_bytes(&[b'a', 0xff, 0xfe, b'b']);
    let back: String = serde_json::from_str(&escaped).unwrap();
    assert_eq!(back, "a\u{fffd}\u{fffd}b");

    let escaped = escape_json_bytes(b"ok\n");
    assert_eq!(escaped, r#""ok\n""#);
}

#[test]
fn test_canonical_sorted_object() {
    let mut map = HashMap::new();
    map.insert("zeta", serde_json::json!(1));
    map.insert("alpha", serde_json::json!(["a", "b"]));
    map.insert("mid", serde_json::json!("x"));

    let first = canonical_sorted_object(&map).unwrap();
    assert_eq!(
        String::from_utf8(first.clone()).unwrap(),
        r#"{"alpha":["a","b"],"mid":"x","zeta":1}"#
    );
    for _ in 0..20 {
        assert_eq!(canonical_sorted_object(&map).unwrap(), first);
    }
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_roundtrip_is_idempotent() {
    let json1 = reference_doc().to_json();
    let parsed = parse_sign_doc(&json1).unwrap();
    assert_eq!(parsed.to_json(), json1);
    assert!(parsed.equals(&reference_doc()));
}

#[test]
fn test_parse_drops_unknown_fields() {
    let injected = REFERENCE_JSON.replacen('{', r#"{"evil":"payload","#, 1);
    let parsed = parse_sign_doc(injected.as_bytes()).unwrap();
    let out = String::from_utf8(parsed.to_json()).unwrap();
    assert!(!out.contains("evil"));
    assert_eq!(out, REFERENCE_JSON);
}

#[test]
fn test_parse_rejects_numeric_integers() {
    let numeric = REFERENCE_JSON.replace(r#""account_sequence":"42""#, r#""account_sequence":42"#);
    let err = parse_sign_doc(numeric.as_bytes()).unwrap_err();
    assert_eq!(err.code, ErrorCode::JsonError);

    let signed = REFERENCE_JSON.replace(r#""nonce":"42""#, r#""nonce":"+42""#);
    assert!(parse_sign_doc(signed.as_bytes()).is_err());
}

#[test]
fn test_parse_malformed_input_is_error() {
    for input in [&b""[..], b"{", b"null", b"\xff\xfe", br#"{"version":1}"#] {
        assert!(parse_sign_doc(input).is_err(), "input {:?}", input);
    }
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_unsupported_version() {
    let mut doc = reference_doc();
    doc.version = "2".to_string();
    let err = doc.validate_basic().unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedVersion);
    assert!(validate_sign_doc_version("1").is_ok());
    assert!(validate_sign_doc_version("").is_err());
}

#[test]
fn test_required_fields() {
    let mut doc = reference_doc();
    doc.chain_id.clear();
    assert_eq!(doc.validate_basic().unwrap_err().code, ErrorCode::SignDocMismatch);

    let mut doc = reference_doc();
    doc.account.clear();
    assert!(doc.validate_basic().is_err());

    let mut doc = reference_doc();
    doc.messages.clear();
    assert!(doc.validate_basic().is_err());
}

#[test]
fn test_message_limits() {
    let mut doc = reference_doc();
    for _ in 1..MAX_MESSAGES_PER_SIGN_DOC {
        doc.add_message(MSG_SEND, Some(MSG_SEND_DATA.to_vec()));
    }
    assert!(doc.validate_basic().is_ok());
    doc.add_message(MSG_SEND, Some(MSG_SEND_DATA.to_vec()));
    assert!(doc.validate_basic().is_err());

    let mut doc = reference_doc();
    let padding = "a".repeat(MAX_MESSAGE_DATA_SIZE);
    doc.messages[0].data = Some(format!(r#"{{"p":"{}"}}"#, padding).into_bytes());
    let err = doc.validate_basic().unwrap_err();
    assert!(err.message.contains("too large"));

    let mut doc = reference_doc();
    doc.messages[0].msg_type.clear();
    assert!(doc.validate_basic().is_err());
}

#[test]
fn test_compact_json_detection() {
    assert!(is_compact_json(br#"{"a":1,"b":[1,2]}"#));
    assert!(is_compact_json(br#"{"text":"has spaces\tand tabs"}"#));
    assert!(is_compact_json(br#"{"q":"escaped \" quote with space"}"#));
    assert!(is_compact_json(b""));
    assert!(!is_compact_json(br#"{"a": 1}"#));
    assert!(!is_compact_json(b"{\n\"a\":1}"));
    assert!(!is_compact_json(br#"{"a":"x\\" ,"b":1}"#));

    let mut doc = reference_doc();
    doc.messages[0].data = Some(br#"{"from": "alice"}"#.to_vec());
    assert!(doc.validate_basic().unwrap_err().message.contains("compact"));
}

#[test]
fn test_message_data_must_be_json() {
    let mut doc = reference_doc();
    doc.messages[0].data = Some(b"{not-json".to_vec());
    assert!(doc.validate_basic().is_err());
}

#[test]
fn test_nfc_rejection() {
    let composed = "caf\u{e9}";
    let decomposed = "cafe\u{301}";
    assert!(is_nfc_normalized(composed));
    assert!(!is_nfc_normalized(decomposed));

    let mut doc = reference_doc();
    doc.memo = composed.to_string();
    assert!(doc.validate_basic().is_ok());

    let setters: [fn(&mut SignDoc, &str); 4] = [
        |d, s| d.memo = s.to_string(),
        |d, s| d.account = s.to_string(),
        |d, s| d.chain_id = s.to_string(),
        |d, s| d.messages[0].msg_type = s.to_string(),
    ];
    for set in setters {
        let mut doc = reference_doc();
        set(&mut doc, decomposed);
        let err = doc.validate_basic().unwrap_err();
        assert!(err.message.contains("NFC"), "{}", err);
    }
}

#[test]
fn test_fee_validation() {
    let mut fee = SignDocFee {
        amount: vec![SignDocCoin::new("stake", 1), SignDocCoin::new("stake", 2)],
        gas_limit: "1".to_string(),
    };
    assert!(fee.validate_basic().unwrap_err().message.contains("duplicate"));

    fee.amount.pop();
    assert!(fee.validate_basic().is_ok());

    fee.gas_limit = "-1".to_string();
    assert!(fee.validate_basic().is_err());
    fee.gas_limit = String::new();
    assert!(fee.validate_basic().is_err());
    fee.gas_limit = "18446744073709551616".to_string();
    assert!(fee.validate_basic().is_err());
    fee.gas_limit = "0".to_string();

    fee.amount = (0..=MAX_FEE_COINS)
        .map(|i| SignDocCoin::new(format!("d{}", i), 1))
        .collect();
    assert!(fee.validate_basic().is_err());

    fee.amount = vec![SignDocCoin::new("x".repeat(65), 1)];
    assert!(fee.validate_basic().is_err());
    fee.amount = vec![SignDocCoin::new("cafe\u{301}", 1)];
    assert!(fee.validate_basic().is_err());
    fee.amount = vec![SignDocCoin {
        denom: "stake".to_string(),
        amount: "1.5".to_string(),
    }];
    assert!(fee.validate_basic().is_err());
}

#[test]
fn test_ratio_validation() {
    assert!(SignDocRatio::new(1, 100).validate_basic().is_ok());
    assert!(SignDocRatio::new(0, 1).validate_basic().is_ok());
    assert!(SignDocRatio::new(1, 0).validate_basic().is_err());

    let bad = SignDocRatio {
        numerator: "abc".to_string(),
        denominator: "1".to_string(),
    };
    assert!(bad.validate_basic().is_err());

    let mut doc = reference_doc();
    doc.fee_slippage = SignDocRatio::new(1, 0);
    assert!(doc.validate_basic().unwrap_err().message.contains("fee_slippage"));
}

// =============================================================================
// Digest sensitivity
// =============================================================================

#[test]
fn test_every_field_changes_digest() {
    let base = reference_doc().sign_bytes();

    let mutations: &[fn(&mut SignDoc)] = &[
        |d| d.chain_id = "punnet-testnet-1".to_string(),
        |d| d.account = "alicf".to_string(),
        |d| d.account_sequence = StringU64(43),
        |d| d.nonce = StringU64(43),
        |d| d.memo = "x".to_string(),
        |d| d.messages[0].msg_type = "/punnet.bank.v1.MsgBurn".to_string(),
        |d| d.messages[0].data = Some(br#"{"from":"alice","to":"bob","amount":"1000001"}"#.to_vec()),
        |d| d.messages[0].data = None,
        |d| d.add_message(MSG_SEND, Some(MSG_SEND_DATA.to_vec())),
        |d| d.fee.amount[0].amount = "5001".to_string(),
        |d| d.fee.amount[0].denom = "atom".to_string(),
        |d| d.fee.gas_limit = "200001".to_string(),
        |d| d.fee_slippage = SignDocRatio::new(2, 100),
        |d| d.fee_slippage = SignDocRatio::new(1, 101),
    ];

    for (i, mutate) in mutations.iter().enumerate() {
        let mut doc = reference_doc();
        mutate(&mut doc);
        assert_ne!(doc.sign_bytes(), base, "mutation {} left digest unchanged", i);
    }
}

#[test]
fn test_message_order_changes_digest() {
    let mut a = reference_doc();
    a.add_message("/punnet.bank.v1.MsgBurn", Some(br#"{"amount":"1"}"#.to_vec()));

    let mut b = reference_doc();
    b.messages.insert(
        0,
        SignDocMessage::new("/punnet.bank.v1.MsgBurn", Some(br#"{"amount":"1"}"#.to_vec())),
    );

    assert!(!a.equals(&b));
    assert_ne!(a.sign_bytes(), b.sign_bytes());
}

#[test]
fn test_cross_chain_sign_bytes_differ() {
    let a = reference_doc();
    let mut b = reference_doc();
    b.chain_id = "punnet-testnet-1".to_string();
    assert_ne!(a.sign_bytes(), b.sign_bytes());
}
