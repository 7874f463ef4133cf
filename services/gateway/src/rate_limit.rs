//! Fixed-window request limiter
//!
//! A counter per identity (client IP) that resets `window` after the first
//! hit. Fixed windows are simpler than sliding ones and the burst allowed
//! at a window boundary is acceptable for this API. The DashMap entry lock
//! is the per-key critical section: check-then-increment cannot race past
//! the limit for the same identity.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

/// The outcome of one rate-limit check, with the metadata callers need
/// for `X-RateLimit-*` response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Seconds until the window resets; set on rejection.
    pub retry_after: Option<u64>,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

pub struct RateLimiter {
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    /// Count one attempt for `key`. Rejected attempts do not increment the
    /// counter, so the count never passes `max_attempts`.
    pub fn check(&self, key: &str, max_attempts: u32, window: Duration) -> Decision {
        let mut entry = self.windows.entry(key.to_string()).or_insert_with(|| Window {
            started: Instant::now(),
            count: 0,
        });

        let elapsed = entry.started.elapsed();
        if elapsed >= window {
            entry.started = Instant::now();
            entry.count = 0;
        }

        if entry.count >= max_attempts {
            let retry_after = window
                .saturating_sub(entry.started.elapsed())
                .as_secs_f64()
                .ceil() as u64;
            return Decision {
                allowed: false,
                limit: max_attempts,
                remaining: 0,
                retry_after: Some(retry_after.max(1)),
            };
        }

        entry.count += 1;
        Decision {
            allowed: true,
            limit: max_attempts,
            remaining: max_attempts - entry.count,
            retry_after: None,
        }
    }

    /// Clear one identity's window immediately.
    pub fn reset(&self, key: &str) {
        self.windows.remove(key);
    }

    /// Remaining quota for `key` without counting an attempt. An expired
    /// or absent window reads as the full quota.
    pub fn remaining(&self, key: &str, max_attempts: u32, window: Duration) -> u32 {
        match self.windows.get(key) {
            Some(w) if w.started.elapsed() < window => max_attempts.saturating_sub(w.count),
            _ => max_attempts,
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
