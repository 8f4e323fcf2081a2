//! Single source of truth for "who is logged in".
//!
//! The store wraps at most one [`Identity`]. Readers take a short read lock
//! and clone the published value; the orchestrator is the only writer and
//! always publishes a whole new `Identity`, so a reader can never observe a
//! half-updated one.

use std::sync::{Arc, PoisonError, RwLock};

use crate::Identity;

#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Identity>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current identity. `None` signs the session out;
    /// subsequent mutation attempts fail with `NotAuthenticated`.
    pub fn set_identity(&self, identity: Option<Identity>) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = identity;
    }

    /// Read-only snapshot of the current identity.
    pub fn current(&self) -> Option<Identity> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Publishes a new identity derived from the current one. No-op when
    /// the session is signed out.
    pub(crate) fn update<F>(&self, f: F)
    where
        F: FnOnce(&Identity) -> Identity,
    {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(identity) = guard.as_ref() {
            *guard = Some(f(identity));
        }
    }
}
