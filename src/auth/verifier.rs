//! Delegated Weight Verification
//!
//! Depth-first weight accumulation over an authorization tree, checked
//! against the matching authority graph:
//!
//! - a key counts once per level, and only if the authority lists it and its
//!   signature verifies
//! - a delegate counts only if its own threshold is met (all or nothing)
//! - cycle detection is path-local, so diamonds are fine but `A -> .. -> A`
//!   is not
//! - depth is bounded and weight sums are overflow-checked
//!
//! The top-level account is used exactly as passed in. Delegated accounts
//! are resolved through the [`AccountGetter`] according to
//! [`DelegateResolution`].

use super::account::{Account, AccountGetter, Authority};
use super::authorization::Authorization;
use crate::error::{PunnetError, PunnetResult};
use crate::types::AccountName;
use crate::{log_debug, log_warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Maximum delegation depth; a chain reaching exactly this depth is accepted
pub const MAX_RECURSION_DEPTH: usize = 10;

const MODULE: &str = "auth::verifier";

/// How delegated accounts are looked up during one verification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelegateResolution {
    /// Fetch from the getter every time a delegate is reached. Concurrent
    /// updates to a delegate may be observed mid-verification.
    #[default]
    Live,
    /// Fetch each delegate at most once per verification and reuse it, so
    /// the whole walk sees one version of every account
    Snapshot,
}

/// Configured authorization verifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationVerifier {
    max_depth: usize,
    resolution: DelegateResolution,
}

impl Default for AuthorizationVerifier {
    fn default() -> Self {
        Self {
            max_depth: MAX_RECURSION_DEPTH,
            resolution: DelegateResolution::Live,
        }
    }
}

impl AuthorizationVerifier {
    pub fn new(max_depth: usize, resolution: DelegateResolution) -> Self {
        Self {
            max_depth,
            resolution,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn resolution(&self) -> DelegateResolution {
        self.resolution
    }

    /// Check that `authorization` satisfies `account`'s authority over
    /// `message`
    ///
    /// Every top-level signature must verify before any weight is counted.
    pub fn verify<G>(
        &self,
        authorization: &Authorization,
        account: &Account,
        message: &[u8],
        getter: &G,
    ) -> PunnetResult<()>
    where
        G: AccountGetter + ?Sized,
    {
        authorization.verify_signatures(message)?;

        let weight = self.calculate_weight(authorization, account, message, getter)?;
        let threshold = account.authority.threshold;
        if weight < threshold {
            log_debug!(MODULE, "insufficient weight", account = account.name, weight = weight, threshold = threshold);
            return Err(PunnetError::insufficient_weight(format!(
                "weight {} < threshold {}",
                weight, threshold
            ))
            .with_details(format!("account {}", account.name)));
        }

        log_debug!(MODULE, "authorization satisfied", account = account.name, weight = weight);
        Ok(())
    }

    /// Weight `authorization` contributes towards `account`'s threshold
    pub fn calculate_weight<G>(
        &self,
        authorization: &Authorization,
        account: &Account,
        message: &[u8],
        getter: &G,
    ) -> PunnetResult<u64>
    where
        G: AccountGetter + ?Sized,
    {
        let mut walk = Walk {
            message,
            getter,
            max_depth: self.max_depth,
            resolution: self.resolution,
            path: HashSet::new(),
            snapshot: HashMap::new(),
        };
        walk.weight(authorization, &account.name, &account.authority, 0)
    }
}

/// Per-call traversal state; nothing here outlives one verification
struct Walk<'a, G: ?Sized> {
    message: &'a [u8],
    getter: &'a G,
    max_depth: usize,
    resolution: DelegateResolution,
    path: HashSet<AccountName>,
    snapshot: HashMap<AccountName, Account>,
}

impl<G: AccountGetter + ?Sized> Walk<'_, G> {
    fn weight(
        &mut self,
        authorization: &Authorization,
        name: &AccountName,
        authority: &Authority,
        depth: usize,
    ) -> PunnetResult<u64> {
        if depth > self.max_depth {
            log_warn!(MODULE, "delegation too deep", account = name, depth = depth);
            return Err(PunnetError::max_recursion_depth(format!(
                "depth {} exceeds {}",
                depth, self.max_depth
            )));
        }
        if !self.path.insert(name.clone()) {
            log_warn!(MODULE, "delegation cycle", account = name);
            return Err(PunnetError::authorization_cycle(format!(
                "account {} appears multiple times in delegation chain",
                name
            )));
        }

        let result = self.level_weight(authorization, authority, depth);
        self.path.remove(name);
        result
    }

    fn level_weight(
        &mut self,
        authorization: &Authorization,
        authority: &Authority,
        depth: usize,
    ) -> PunnetResult<u64> {
        let mut total: u64 = 0;
        let mut seen_keys: HashSet<&[u8]> = HashSet::new();

        // A key may appear once per level, whether or not its signature verifies
        for sig in &authorization.signatures {
            if !seen_keys.insert(sig.pub_key.as_slice()) {
                return Err(PunnetError::duplicate_signature(
                    "public key already provided a signature",
                ));
            }
            if authority.has_key(&sig.pub_key) && sig.verify(self.message) {
                total = add_weight(total, authority.key_weight(&sig.pub_key))?;
            }
        }

        for (delegate, sub_authorization) in &authorization.account_authorizations {
            if !authority.has_account(delegate) {
                continue;
            }

            let account = self.resolve(delegate).map_err(|e| in_delegate(delegate, e))?;
            let weight = self
                .weight(sub_authorization, delegate, &account.authority, depth + 1)
                .map_err(|e| in_delegate(delegate, e))?;

            if weight >= account.authority.threshold {
                total = add_weight(total, authority.account_weight(delegate))?;
            } else {
                log_debug!(
                    MODULE,
                    "delegate below threshold",
                    account = delegate,
                    weight = weight,
                    threshold = account.authority.threshold
                );
            }
        }

        Ok(total)
    }

    fn resolve(&mut self, name: &AccountName) -> PunnetResult<Account> {
        match self.resolution {
            DelegateResolution::Live => self.getter.get_account(name),
            DelegateResolution::Snapshot => {
                if let Some(account) = self.snapshot.get(name) {
                    return Ok(account.clone());
                }
                let account = self.getter.get_account(name)?;
                self.snapshot.insert(name.clone(), account.clone());
                Ok(account)
            }
        }
    }
}

fn add_weight(total: u64, weight: u64) -> PunnetResult<u64> {
    total
        .checked_add(weight)
        .ok_or_else(|| PunnetError::weight_overflow("weight calculation overflow"))
}

fn in_delegate(name: &AccountName, mut err: PunnetError) -> PunnetError {
    err.message = format!("delegated account {}: {}", name, err.message);
    if err.details.is_none() {
        err.details = Some(format!("account {}", name));
    }
    err
}
