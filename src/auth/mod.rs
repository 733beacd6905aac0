//! Authorization Engine
//!
//! Weighted multi-signature authorization with account delegation:
//! - [`Signature`]: one algorithm-tagged signature over sign bytes
//! - [`Authority`] / [`Account`]: threshold policy over keys and delegates
//! - [`Authorization`]: the proof tree a transaction carries
//! - [`AuthorizationVerifier`]: the bounded, cycle-checked weight walk
//! - [`MultiSignCoordinator`]: collecting signatures from several signers

pub mod account;
pub mod authorization;
pub mod multisign;
pub mod signature;
pub mod verifier;

pub use account::{Account, AccountGetter, Authority};
pub use authorization::Authorization;
pub use multisign::{Ed25519Signer, MultiSignCoordinator, Signer};
pub use signature::Signature;
pub use verifier::{AuthorizationVerifier, DelegateResolution, MAX_RECURSION_DEPTH};
