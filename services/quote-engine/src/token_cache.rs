//! TTL'd login cache
//!
//! The authenticating provider caches its bearer token (and the username
//! it logged in as) for 30 minutes so concurrent and subsequent fetches
//! reuse one login. Entries are keyed by provider identity; `login_guard`
//! hands out a per-key async lock so concurrent cache misses perform a
//! single upstream login instead of racing.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;

/// Default time-to-live for cached logins.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// A cached login handshake result.
#[derive(Debug, Clone)]
pub struct CachedLogin {
    pub token: String,
    pub user: Option<String>,
}

#[derive(Debug)]
struct Entry {
    login: CachedLogin,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct TokenCache {
    ttl: Duration,
    entries: DashMap<String, Entry>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl TokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
            locks: DashMap::new(),
        }
    }

    /// Fetch a cached login, dropping it if the TTL has lapsed.
    pub fn get(&self, key: &str) -> Option<CachedLogin> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Some(entry.login.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Store a login under `key` for the configured TTL.
    pub fn put(&self, key: &str, login: CachedLogin) {
        self.entries.insert(
            key.to_string(),
            Entry {
                login,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop a cached login immediately.
    pub fn invalidate(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Acquire the per-key login lock. Callers hold the guard across the
    /// check-miss-login-store sequence; a second caller blocked here will
    /// see the first caller's entry on wakeup and skip its own login.
    pub async fn login_guard(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_TTL)
    }
}
