//! The account-mutation orchestrator.
//!
//! Runs one [`MutationRequest`] through the state machine
//!
//! ```text
//! Idle → Attempting → (Success
//!                     | NeedsReauth → Prompting → Reverifying → Retrying
//!                                   → (Success | Failed))
//!                     | Failed
//! ```
//!
//! The provider's stale-session refusal is the only failure recovered in
//! place: collect a secret once, re-verify it, retry the original mutation
//! once. Every other failure propagates unchanged, with no silent retries
//! and no backoff — these are user-initiated, low-frequency operations.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use secrecy::SecretString;

use crate::{
    AuthError, CredentialVerifier, Identity, IdentityProvider, MutationOutcome, MutationRequest,
    ReauthPrompt, SessionStore,
};

#[derive(Debug)]
pub struct AccountOrchestrator<P, G> {
    provider: Arc<P>,
    prompt: Arc<G>,
    session: SessionStore,
    verifier: CredentialVerifier<P>,
    in_flight: Arc<AtomicBool>,
}

/// Releases the in-flight slot on every exit path.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<P, G> AccountOrchestrator<P, G>
where
    P: IdentityProvider,
    G: ReauthPrompt,
{
    pub fn new(provider: Arc<P>, prompt: Arc<G>, session: SessionStore) -> Self {
        let verifier = CredentialVerifier::new(provider.clone(), session.clone());
        Self {
            provider,
            prompt,
            session,
            verifier,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Executes one mutation to a terminal outcome.
    ///
    /// The state machine is not reentrant: a request arriving while another
    /// is in flight fails `Busy` immediately, it is never queued.
    pub async fn execute(&self, request: MutationRequest) -> MutationOutcome {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return MutationOutcome::Failed(AuthError::Busy);
        }
        let _guard = InFlightGuard(self.in_flight.clone());

        let kind = request.kind();
        let outcome = self.run(request).await;
        match &outcome {
            MutationOutcome::Success => tracing::info!(kind, "account mutation succeeded"),
            MutationOutcome::Failed(err) => {
                tracing::warn!(kind, error = %err, "account mutation failed");
            }
            // run() only returns terminal outcomes.
            MutationOutcome::NeedsSecret => {}
        }
        outcome
    }

    async fn run(&self, request: MutationRequest) -> MutationOutcome {
        let Some(identity) = self.session.current() else {
            return MutationOutcome::Failed(AuthError::NotAuthenticated);
        };

        // A password change proves the caller-supplied current secret first,
        // so a stale session cannot slip through on a wrong assumption of
        // freshness. Email change and deletion attempt directly.
        if let MutationRequest::ChangePassword { current, .. } = &request {
            if let Err(err) = self.verifier.verify(&identity.email, current).await {
                return MutationOutcome::Failed(err);
            }
        }

        match self.attempt(&request).await {
            MutationOutcome::Success => self.finish(&request),
            MutationOutcome::NeedsSecret => self.recover(&request, &identity).await,
            failed => failed,
        }
    }

    /// One direct attempt against the provider.
    async fn attempt(&self, request: &MutationRequest) -> MutationOutcome {
        let result = match request {
            MutationRequest::ChangePassword { new, .. } => self.provider.change_secret(new).await,
            MutationRequest::ChangeEmail { new_email } => {
                self.provider.change_email(new_email).await
            }
            MutationRequest::DeleteAccount => self.provider.delete_account().await,
        };

        match result {
            Ok(()) => MutationOutcome::Success,
            Err(AuthError::RequiresFreshSession) => MutationOutcome::NeedsSecret,
            Err(err) => MutationOutcome::Failed(err),
        }
    }

    /// Prompting → Reverifying → Retrying. Runs at most once per request.
    async fn recover(&self, request: &MutationRequest, identity: &Identity) -> MutationOutcome {
        tracing::debug!(kind = request.kind(), "stale session, prompting for secret");

        let Some(secret) = self.prompt.collect_secret().await else {
            // User declined; the backend is not touched again.
            return MutationOutcome::Failed(AuthError::Cancelled);
        };

        if let Err(err) = self.verifier.verify(&identity.email, &secret).await {
            return MutationOutcome::Failed(err);
        }

        match self.attempt(request).await {
            MutationOutcome::Success => self.finish(request),
            // The retry is terminal; a second stale-session refusal
            // surfaces as-is instead of looping.
            MutationOutcome::NeedsSecret => {
                MutationOutcome::Failed(AuthError::RequiresFreshSession)
            }
            failed => failed,
        }
    }

    /// Applies the session-store side effects before reporting `Success`,
    /// so no reader can observe a successful deletion with a live session.
    fn finish(&self, request: &MutationRequest) -> MutationOutcome {
        match request {
            MutationRequest::ChangePassword { .. } => {}
            MutationRequest::ChangeEmail { new_email } => {
                self.session.update(|identity| identity.with_email(new_email));
            }
            MutationRequest::DeleteAccount => {
                self.session.set_identity(None);
            }
        }
        MutationOutcome::Success
    }

    /// Convenience wrapper over [`execute`](Self::execute).
    pub async fn change_password(
        &self,
        current: SecretString,
        new: SecretString,
    ) -> Result<(), AuthError> {
        self.execute(MutationRequest::ChangePassword { current, new })
            .await
            .into_result()
    }

    /// Convenience wrapper over [`execute`](Self::execute).
    pub async fn change_email(&self, new_email: &str) -> Result<(), AuthError> {
        self.execute(MutationRequest::ChangeEmail {
            new_email: new_email.to_string(),
        })
        .await
        .into_result()
    }

    /// Convenience wrapper over [`execute`](Self::execute).
    pub async fn delete_account(&self) -> Result<(), AuthError> {
        self.execute(MutationRequest::DeleteAccount)
            .await
            .into_result()
    }
}
