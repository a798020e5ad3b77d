//! Short-term denylist of revoked refresh values.
//!
//! Defense in depth behind the persisted revocation flag: even a lookup
//! path that somehow misses the `RefreshRecord` check is still rejected
//! here for as long as the token could possibly verify. Entries expire at
//! the token's own expiry, so the list never retains a value past the
//! point it could be replayed.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

#[derive(Default)]
pub struct Denylist {
    /// token value -> instant the entry stops mattering
    entries: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl Denylist {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Deny `token` until `expires_at`. Inserting an already-denied value
    /// keeps the later of the two expiries.
    pub fn insert(&self, token: &str, expires_at: DateTime<Utc>) {
        let mut entries = self.lock();
        entries
            .entry(token.to_string())
            .and_modify(|until| *until = (*until).max(expires_at))
            .or_insert(expires_at);
    }

    pub fn contains(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.lock().get(token).map(|until| *until > now).unwrap_or(false)
    }

    /// Drop entries whose window has elapsed. Called opportunistically by
    /// the manager after revocations.
    pub fn purge_expired(&self, now: DateTime<Utc>) {
        self.lock().retain(|_, until| *until > now);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }
}
