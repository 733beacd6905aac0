use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const REFERENCE_JSON: &str = r#"{"version":"1","chain_id":"punnet-mainnet-1","account":"alice","account_sequence":"42","messages":[{"type":"/punnet.bank.v1.MsgSend","data":{"from":"alice","to":"bob","amount":"1000000"}}],"nonce":"42","memo":"","fee":{"amount":[{"denom":"stake","amount":"5000"}],"gas_limit":"200000"},"fee_slippage":{"numerator":"1","denominator":"100"}}"#;
const REFERENCE_SIGN_BYTES: &str = "a0d621ab6ee70419f5f4506cf103d9b3feaf5912fc45272f485e06e976aed86d";
const REFERENCE_PUBLIC_KEY: &str = "c0db51f52b5f8f655a165d9d936f91a078ef92200787ef95e8d17c207379ee94";
const REFERENCE_SIGNATURE: &str = "d8598c8529a42218d691f89aa204dc7117a4502314dd02b79632da6cd551ed4836bc131e46eb2102314b9d0a10e6454a116d7973aacd88c953e214e9072fc506";

fn run(args: &[&str], stdin: &str) -> Output {
    let binary_path = assert_cmd::cargo::cargo_bin!("punnet-sign");
    let mut child = Command::new(binary_path)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("cli starts");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("cli exits")
}

fn stdout(output: &Output) -> String {
    assert!(output.status.success(), "cli exited unsuccessfully: {:?}", output);
    String::from_utf8(output.stdout.clone()).expect("stdout is utf8")
}

#[test]
fn test_vector_matches_reference() {
    let output = run(&["test-vector", "--json"], "");
    let report: Value = serde_json::from_str(&stdout(&output)).expect("stdout is valid json");

    assert_eq!(report["canonical_json"], REFERENCE_JSON);
    assert_eq!(report["sign_bytes"], REFERENCE_SIGN_BYTES);
    assert_eq!(report["public_key"], REFERENCE_PUBLIC_KEY);
    assert_eq!(report["signature"], REFERENCE_SIGNATURE);
}

#[test]
fn canonicalize_reorders_and_drops_unknown_fields() {
    let scrambled = r#"{
        "fee_slippage": {"denominator": "100", "numerator": "1"},
        "memo": "",
        "nonce": "42",
        "extra": [1, 2, 3],
        "fee": {"gas_limit": "200000", "amount": [{"amount": "5000", "denom": "stake"}]},
        "account": "alice",
        "messages": [{"data": {"from":"alice","to":"bob","amount":"1000000"}, "type": "/punnet.bank.v1.MsgSend"}],
        "account_sequence": "42",
        "chain_id": "punnet-mainnet-1",
        "version": "1"
    }"#;

    let output = run(&["canonicalize"], scrambled);
    assert_eq!(stdout(&output).trim_end(), REFERENCE_JSON);
}

#[test]
fn canonicalize_json_report_keeps_canonical_bytes() {
    let plain = run(&["canonicalize"], REFERENCE_JSON);
    let output = run(&["canonicalize", "--json"], REFERENCE_JSON);
    let report: Value = serde_json::from_str(&stdout(&output)).expect("stdout is valid json");

    assert_eq!(report["canonical"], stdout(&plain).trim_end());
    assert_eq!(report["canonical"], REFERENCE_JSON);
    assert_eq!(report["sign_bytes"], REFERENCE_SIGN_BYTES);
}

#[test]
fn sign_bytes_of_reference_document() {
    let output = run(&["sign-bytes"], REFERENCE_JSON);
    assert_eq!(stdout(&output).trim(), REFERENCE_SIGN_BYTES);

    let output = run(&["sign-bytes", "--json"], REFERENCE_JSON);
    let report: Value = serde_json::from_str(&stdout(&output)).expect("stdout is valid json");
    assert_eq!(report["sign_bytes"], REFERENCE_SIGN_BYTES);
}

#[test]
fn invalid_documents_fail() {
    let unsupported = REFERENCE_JSON.replace(r#""version":"1""#, r#""version":"2""#);
    let output = run(&["canonicalize"], &unsupported);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"), "stderr: {}", stderr);

    let numeric = REFERENCE_JSON.replace(r#""nonce":"42""#, r#""nonce":42"#);
    assert!(!run(&["sign-bytes"], &numeric).status.success());

    assert!(!run(&["canonicalize"], "").status.success());
}
