//! Rate-limited Deprecation Warnings
//!
//! Messages without a canonical SignDoc payload fall back to signing only
//! their signer list. Every fallback is reported, but at most once per
//! message type per interval so hot paths do not flood the log.

use crate::log_warn;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default minimum time between warnings for one message type
pub const DEFAULT_DEPRECATION_INTERVAL: Duration = Duration::from_secs(60);

const MODULE: &str = "deprecation";

/// Per-owner deprecation warning state
///
/// Safe to share between threads. `interval = None` warns once per message
/// type for the lifetime of the tracker; `Some(Duration::ZERO)` warns every
/// time.
#[derive(Debug)]
pub struct DeprecationTracker {
    state: Mutex<TrackerState>,
}

#[derive(Debug)]
struct TrackerState {
    last_warned: HashMap<String, Instant>,
    interval: Option<Duration>,
    enabled: bool,
    emitted: u64,
}

impl Default for DeprecationTracker {
    fn default() -> Self {
        Self::new(Some(DEFAULT_DEPRECATION_INTERVAL), true)
    }
}

impl DeprecationTracker {
    pub fn new(interval: Option<Duration>, enabled: bool) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                last_warned: HashMap::new(),
                interval,
                enabled,
                emitted: 0,
            }),
        }
    }

    /// Tracker that never warns
    pub fn silent() -> Self {
        Self::new(None, false)
    }

    /// Record a signers-only fallback for `msg_type`
    ///
    /// Returns `true` if a warning was emitted.
    pub fn warn_signers_only_fallback(&self, msg_type: &str) -> bool {
        let now = Instant::now();
        {
            let mut state = self.lock();
            if !state.enabled {
                return false;
            }

            if let Some(last) = state.last_warned.get(msg_type) {
                let due = match state.interval {
                    None => false,
                    Some(interval) => now.duration_since(*last) >= interval,
                };
                if !due {
                    return false;
                }
            }
            state.last_warned.insert(msg_type.to_string(), now);
            state.emitted += 1;
        }

        log_warn!(
            MODULE,
            "message has no canonical SignDoc data, using signers-only fallback",
            msg_type = msg_type,
            security_note = "signatures do not bind to full message content"
        );
        true
    }

    /// Forget every recorded warning
    pub fn reset(&self) {
        let mut state = self.lock();
        state.last_warned.clear();
        state.emitted = 0;
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.lock().enabled = enabled;
    }

    pub fn set_interval(&self, interval: Option<Duration>) {
        self.lock().interval = interval;
    }

    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    /// Number of distinct message types warned about so far
    pub fn warned_count(&self) -> usize {
        self.lock().last_warned.len()
    }

    /// Total warnings logged so far
    pub fn warnings_emitted(&self) -> u64 {
        self.lock().emitted
    }

    // The state is plain bookkeeping, so a poisoned lock is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
