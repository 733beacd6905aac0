//! Unified error types for the signing core
//!
//! Every failure surfaced by the codec, the signature layer and the
//! authorization engine flows through [`PunnetError`]. Callers branch on
//! [`ErrorCode`] (or its coarser [`ErrorKind`]) rather than on message text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all signing-core operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunnetError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl PunnetError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Category of this error, see [`ErrorKind`]
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }

    // Convenience constructors
    pub fn unsupported_version(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedVersion, msg)
    }

    pub fn sign_doc_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SignDocMismatch, msg)
    }

    pub fn invalid_signature(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSignature, msg)
    }

    pub fn unsupported_algorithm(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedAlgorithm, msg)
    }

    pub fn invalid_public_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPublicKey, msg)
    }

    pub fn insufficient_weight(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientWeight, msg)
    }

    pub fn authorization_cycle(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthorizationCycle, msg)
    }

    pub fn max_recursion_depth(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MaxRecursionDepth, msg)
    }

    pub fn duplicate_signature(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateSignature, msg)
    }

    pub fn weight_overflow(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::WeightOverflow, msg)
    }

    pub fn account_not_found(name: impl fmt::Display) -> Self {
        Self::new(ErrorCode::AccountNotFound, format!("account {} not found", name))
    }

    pub fn invalid_authorization(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAuthorization, msg)
    }

    pub fn invalid_authority(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAuthority, msg)
    }

    pub fn invalid_account(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAccount, msg)
    }

    pub fn invalid_transaction(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTransaction, msg)
    }

    pub fn invalid_coin(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCoin, msg)
    }

    pub fn invalid_message(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMessage, msg)
    }

    pub fn chain_id_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ChainIdMismatch, msg)
    }

    pub fn sequence_mismatch(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::SequenceMismatch, msg)
    }

    pub fn missing_argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingArgument, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::JsonError, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for PunnetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for PunnetError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Structural errors
    UnsupportedVersion,
    SignDocMismatch,
    InvalidAccount,
    InvalidAuthority,
    InvalidAuthorization,
    InvalidTransaction,
    InvalidCoin,
    InvalidMessage,
    ChainIdMismatch,
    SequenceMismatch,
    MissingArgument,

    // Cryptographic errors
    InvalidSignature,
    UnsupportedAlgorithm,
    InvalidPublicKey,

    // Policy errors
    InsufficientWeight,

    // Delegation graph errors
    AuthorizationCycle,
    MaxRecursionDepth,
    DuplicateSignature,
    WeightOverflow,

    // Collaborator errors
    AccountNotFound,

    // Parse errors
    JsonError,
    HexError,

    // Internal
    Internal,
}

/// Coarse error taxonomy
///
/// Graph-structure errors indicate malicious input or misconfiguration and
/// are never worth retrying; collaborator errors usually are caller-correctable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Structural,
    Cryptographic,
    Policy,
    GraphStructure,
    Collaborator,
    Parse,
    Internal,
}

impl ErrorCode {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedVersion
            | Self::SignDocMismatch
            | Self::InvalidAccount
            | Self::InvalidAuthority
            | Self::InvalidAuthorization
            | Self::InvalidTransaction
            | Self::InvalidCoin
            | Self::InvalidMessage
            | Self::ChainIdMismatch
            | Self::SequenceMismatch
            | Self::MissingArgument => ErrorKind::Structural,
            Self::InvalidSignature | Self::UnsupportedAlgorithm | Self::InvalidPublicKey => {
                ErrorKind::Cryptographic
            }
            Self::InsufficientWeight => ErrorKind::Policy,
            Self::AuthorizationCycle
            | Self::MaxRecursionDepth
            | Self::DuplicateSignature
            | Self::WeightOverflow => ErrorKind::GraphStructure,
            Self::AccountNotFound => ErrorKind::Collaborator,
            Self::JsonError | Self::HexError => ErrorKind::Parse,
            Self::Internal => ErrorKind::Internal,
        }
    }
}

/// Result type alias for signing-core operations
pub type PunnetResult<T> = Result<T, PunnetError>;

// Conversions from common error types

impl From<serde_json::Error> for PunnetError {
    fn from(e: serde_json::Error) -> Self {
        PunnetError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for PunnetError {
    fn from(e: hex::FromHexError) -> Self {
        PunnetError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<std::io::Error> for PunnetError {
    fn from(e: std::io::Error) -> Self {
        PunnetError::new(ErrorCode::Internal, e.to_string())
    }
}
