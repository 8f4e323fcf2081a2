//! Credential verification.
//!
//! Proving knowledge of the current secret refreshes the provider-side
//! session; the verifier mirrors that by bumping the identity's
//! `verified_at` in the session store before returning, so a retried
//! mutation always observes a fresh session.

use std::sync::Arc;

use chrono::Utc;
use secrecy::SecretString;

use crate::{IdentityProvider, ResultAuth, SessionStore};

#[derive(Debug)]
pub struct CredentialVerifier<P> {
    provider: Arc<P>,
    session: SessionStore,
}

impl<P: IdentityProvider> CredentialVerifier<P> {
    pub fn new(provider: Arc<P>, session: SessionStore) -> Self {
        Self { provider, session }
    }

    /// Fails `InvalidCredential | RateLimited | Network`. Safe to retry on
    /// a network error, but never retried silently by the core.
    pub async fn verify(&self, email: &str, secret: &SecretString) -> ResultAuth<()> {
        self.provider.reauthenticate(email, secret).await?;
        self.session.update(|identity| identity.refreshed(Utc::now()));
        Ok(())
    }
}
