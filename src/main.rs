//! punnet-sign: inspect and canonicalize SignDocs from the command line

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use punnet_signing::auth::{Ed25519Signer, Signer};
use punnet_signing::signdoc::{parse_sign_doc, SignDoc, SignDocCoin, SignDocFee, SignDocRatio};
use punnet_signing::tx::validate_sign_doc;
use punnet_signing::utils::logging;
use punnet_signing::{log_debug, log_error};
use serde_json::json;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

const MODULE: &str = "punnet-sign";

/// Label whose SHA-256 is the test-vector Ed25519 seed
const TEST_VECTOR_SEED_LABEL: &str = "punnet-sdk-test-vector-seed-ed25519";

#[derive(Debug, Parser)]
#[command(name = "punnet-sign", version, about = "Canonical SignDoc tooling")]
struct Arguments {
    /// Emit machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse and validate a SignDoc, print its canonical JSON
    Canonicalize {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Print the hex SHA-256 sign bytes of a SignDoc
    SignBytes {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Print the cross-implementation reference vector
    TestVector,
}

fn main() {
    let args = Arguments::parse();
    if args.debug {
        logging::enable_debug();
    }

    if let Err(e) = run(&args) {
        log_error!(MODULE, "command failed", error = format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Arguments) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    match &args.command {
        Command::Canonicalize { file } => {
            let doc = load_sign_doc(file.as_ref())?;
            let canonical = doc.to_json();
            if args.json {
                // Kept as a string so the signed bytes survive unchanged
                let canonical = String::from_utf8(canonical).context("canonical JSON is not UTF-8")?;
                writeln!(
                    stdout,
                    "{}",
                    json!({ "canonical": canonical, "sign_bytes": hex::encode(doc.sign_bytes()) })
                )?;
            } else {
                stdout.write_all(&canonical)?;
                writeln!(stdout)?;
            }
        }
        Command::SignBytes { file } => {
            let doc = load_sign_doc(file.as_ref())?;
            let sign_bytes = hex::encode(doc.sign_bytes());
            if args.json {
                writeln!(stdout, "{}", json!({ "sign_bytes": sign_bytes }))?;
            } else {
                writeln!(stdout, "{}", sign_bytes)?;
            }
        }
        Command::TestVector => {
            let doc = reference_sign_doc();
            let sign_bytes = doc.sign_bytes();
            let signer = Ed25519Signer::from_label(TEST_VECTOR_SEED_LABEL)?;
            let signature = signer.sign(&sign_bytes)?;
            let canonical = String::from_utf8(doc.to_json())
                .context("canonical JSON is not UTF-8")?;

            if args.json {
                writeln!(
                    stdout,
                    "{}",
                    json!({
                        "canonical_json": canonical,
                        "sign_bytes": hex::encode(sign_bytes),
                        "public_key": hex::encode(signer.public_key()),
                        "signature": hex::encode(signature),
                    })
                )?;
            } else {
                writeln!(stdout, "canonical_json: {}", canonical)?;
                writeln!(stdout, "sign_bytes:     {}", hex::encode(sign_bytes))?;
                writeln!(stdout, "public_key:     {}", hex::encode(signer.public_key()))?;
                writeln!(stdout, "signature:      {}", hex::encode(signature))?;
            }
        }
    }

    Ok(())
}

fn load_sign_doc(file: Option<&PathBuf>) -> anyhow::Result<SignDoc> {
    let payload = match file {
        Some(path) => fs::read(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer).context("reading stdin")?;
            buffer
        }
    };
    if payload.iter().all(u8::is_ascii_whitespace) {
        bail!("empty input");
    }

    log_debug!(MODULE, "parsing SignDoc", bytes = payload.len());
    let doc = parse_sign_doc(&payload)?;
    validate_sign_doc(&doc)?;
    Ok(doc)
}

/// `punnet-mainnet-1` / alice / sequence 42 transfer of 1000000 to bob
fn reference_sign_doc() -> SignDoc {
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
    doc.add_message(
        "/punnet.bank.v1.MsgSend",
        Some(br#"{"from":"alice","to":"bob","amount":"1000000"}"#.to_vec()),
    );
    doc
}
