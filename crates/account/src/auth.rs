//! Session bootstrap: sign-in, sign-up, sign-out and secret reset.
//!
//! The profile document is ensured right after a successful sign-in or
//! sign-up. Its write is best effort: a profile-store failure is logged and
//! never fails the authentication that triggered it.

use std::sync::Arc;

use secrecy::SecretString;

use crate::{
    AuthError, Identity, IdentityProvider, ProfileFields, ProfileStore, ResultAuth, SessionStore,
};

#[derive(Debug)]
pub struct Authenticator<P, S> {
    provider: Arc<P>,
    profile: Arc<S>,
    session: SessionStore,
}

impl<P, S> Authenticator<P, S>
where
    P: IdentityProvider,
    S: ProfileStore,
{
    pub fn new(provider: Arc<P>, profile: Arc<S>, session: SessionStore) -> Self {
        Self {
            provider,
            profile,
            session,
        }
    }

    pub async fn sign_in(&self, email: &str, secret: &SecretString) -> ResultAuth<Identity> {
        let identity = self.provider.sign_in(email, secret).await?;
        self.session.set_identity(Some(identity.clone()));
        self.ensure_profile(&identity).await;
        Ok(identity)
    }

    pub async fn sign_up(
        &self,
        email: &str,
        secret: &SecretString,
        display_name: Option<&str>,
    ) -> ResultAuth<Identity> {
        let identity = self.provider.sign_up(email, secret, display_name).await?;
        self.session.set_identity(Some(identity.clone()));
        self.ensure_profile(&identity).await;
        Ok(identity)
    }

    pub async fn sign_out(&self) -> ResultAuth<()> {
        self.provider.sign_out().await?;
        self.session.set_identity(None);
        Ok(())
    }

    /// Fire-and-forget reset notification. The format gate keeps obviously
    /// malformed addresses from reaching the provider.
    pub async fn send_secret_reset_email(&self, email: &str) -> ResultAuth<()> {
        if !looks_like_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        self.provider.send_secret_reset_email(email).await
    }

    async fn ensure_profile(&self, identity: &Identity) {
        let fields = ProfileFields {
            display_name: identity.display_name.clone(),
            ..ProfileFields::default()
        };
        if let Err(err) = self.profile.upsert_profile(&identity.user_id, &fields).await {
            tracing::warn!(user_id = %identity.user_id, error = %err, "profile upsert failed");
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
