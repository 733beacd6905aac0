//! Signing Configuration
//!
//! Presets for the authorization verifier and the deprecation tracker:
//! - `standard()` follows the reference behavior (live delegate lookups,
//!   depth 10, one fallback warning per message type per minute)
//! - `strict()` pins each delegate for the duration of a verification and
//!   warns on every signers-only fallback

use crate::auth::{AuthorizationVerifier, DelegateResolution, MAX_RECURSION_DEPTH};
use crate::utils::deprecation::{DeprecationTracker, DEFAULT_DEPRECATION_INTERVAL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningProfile {
    Standard,
    Strict,
    Custom,
}

/// Verifier and tracker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    pub profile: SigningProfile,

    /// Deepest delegation level accepted
    pub max_recursion_depth: usize,
    pub delegate_resolution: DelegateResolution,

    /// Minimum gap between fallback warnings for one message type
    /// (`None` = once per tracker lifetime)
    pub deprecation_interval: Option<Duration>,
    pub deprecation_warnings: bool,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SigningConfig {
    pub fn standard() -> Self {
        Self {
            profile: SigningProfile::Standard,
            max_recursion_depth: MAX_RECURSION_DEPTH,
            delegate_resolution: DelegateResolution::Live,
            deprecation_interval: Some(DEFAULT_DEPRECATION_INTERVAL),
            deprecation_warnings: true,
        }
    }

    pub fn strict() -> Self {
        Self {
            profile: SigningProfile::Strict,
            max_recursion_depth: MAX_RECURSION_DEPTH,
            delegate_resolution: DelegateResolution::Snapshot,
            deprecation_interval: Some(Duration::ZERO),
            deprecation_warnings: true,
        }
    }

    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self.profile = SigningProfile::Custom;
        self
    }

    pub fn with_delegate_resolution(mut self, resolution: DelegateResolution) -> Self {
        self.delegate_resolution = resolution;
        self.profile = SigningProfile::Custom;
        self
    }

    /// Validate configuration and return warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.max_recursion_depth == 0 {
            warnings.push("max_recursion_depth of 0 disables delegation entirely".to_string());
        }
        if self.max_recursion_depth > MAX_RECURSION_DEPTH {
            warnings.push(format!(
                "max_recursion_depth {} exceeds the network limit of {}; peers will reject deeper chains",
                self.max_recursion_depth, MAX_RECURSION_DEPTH
            ));
        }
        if self.delegate_resolution == DelegateResolution::Live {
            warnings.push(
                "live delegate resolution may observe concurrent account updates mid-verification"
                    .to_string(),
            );
        }
        if !self.deprecation_warnings {
            warnings.push("signers-only fallback warnings are disabled".to_string());
        }

        warnings
    }

    pub fn verifier(&self) -> AuthorizationVerifier {
        AuthorizationVerifier::new(self.max_recursion_depth, self.delegate_resolution)
    }

    pub fn deprecation_tracker(&self) -> DeprecationTracker {
        DeprecationTracker::new(self.deprecation_interval, self.deprecation_warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_defaults() {
        let config = SigningConfig::default();
        assert_eq!(config.profile, SigningProfile::Standard);
        assert_eq!(config.max_recursion_depth, 10);
        assert_eq!(config.deprecation_interval, Some(Duration::from_secs(60)));

        let verifier = config.verifier();
        assert_eq!(verifier.max_depth(), 10);
        assert_eq!(verifier.resolution(), DelegateResolution::Live);
    }

    #[test]
    fn test_strict_preset() {
        let config = SigningConfig::strict();
        assert_eq!(config.verifier().resolution(), DelegateResolution::Snapshot);
        assert!(config.validate().is_empty());

        let tracker = config.deprecation_tracker();
        assert!(tracker.warn_signers_only_fallback("/test.Msg"));
        assert!(tracker.warn_signers_only_fallback("/test.Msg"));
    }

    #[test]
    fn test_validation_warnings() {
        let config = SigningConfig::strict().with_max_recursion_depth(0);
        assert_eq!(config.profile, SigningProfile::Custom);
        assert!(config.validate().iter().any(|w| w.contains("disables delegation")));

        let config = SigningConfig::strict().with_max_recursion_depth(20);
        assert!(config.validate().iter().any(|w| w.contains("network limit")));

        assert!(SigningConfig::standard()
            .validate()
            .iter()
            .any(|w| w.contains("live delegate resolution")));
    }
}
