//! Utilities Module
//!
//! Logging and deprecation bookkeeping shared across the crate.

pub mod deprecation;
pub mod logging;

pub use deprecation::DeprecationTracker;
