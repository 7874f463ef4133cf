//! Process-scoped quote filter
//!
//! A single mutable string, written by the admin endpoint and read by the
//! event publisher on every publish. Injected explicitly rather than held
//! as a global; an empty string means no filter is active.

use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct FilterState {
    inner: RwLock<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> String {
        self.inner.read().expect("filter lock poisoned").clone()
    }

    pub fn set(&self, filter: impl Into<String>) {
        *self.inner.write().expect("filter lock poisoned") = filter.into();
    }
}
