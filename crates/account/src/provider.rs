//! Seams toward the hosted backend and the platform UI.
//!
//! The core is transport-agnostic: it talks to the identity provider, the
//! interactive secret prompt and the profile document store only through
//! these traits. Each deployment target supplies its own implementations.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::{Identity, ResultAuth};

/// The hosted identity provider.
///
/// `change_secret`, `change_email` and `delete_account` act on the
/// provider-side session established by `sign_in`/`sign_up` and may fail
/// with `RequiresFreshSession` when that session is too old for a
/// sensitive mutation.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fails `InvalidCredential | Network`.
    async fn sign_in(&self, email: &str, secret: &SecretString) -> ResultAuth<Identity>;

    /// Fails `EmailInUse | WeakSecret`.
    async fn sign_up(
        &self,
        email: &str,
        secret: &SecretString,
        display_name: Option<&str>,
    ) -> ResultAuth<Identity>;

    /// Proves knowledge of the current secret, refreshing the provider-side
    /// session. Fails `InvalidCredential | RateLimited | Network`.
    async fn reauthenticate(&self, email: &str, secret: &SecretString) -> ResultAuth<()>;

    /// Fails `RequiresFreshSession | WeakSecret`.
    async fn change_secret(&self, new_secret: &SecretString) -> ResultAuth<()>;

    /// Fails `RequiresFreshSession | EmailInUse | InvalidEmail`.
    async fn change_email(&self, new_email: &str) -> ResultAuth<()>;

    /// Fails `RequiresFreshSession`.
    async fn delete_account(&self) -> ResultAuth<()>;

    /// Fire-and-forget notification. Fails `InvalidEmail | Network`.
    async fn send_secret_reset_email(&self, email: &str) -> ResultAuth<()>;

    /// Drops the provider-side session.
    async fn sign_out(&self) -> ResultAuth<()>;
}

/// Platform-specific interactive secret collection.
///
/// The wait is unbounded; whether a cancel action exists is up to the
/// implementation. `None` means the user declined to supply a secret.
#[async_trait]
pub trait ReauthPrompt: Send + Sync {
    async fn collect_secret(&self) -> Option<SecretString>;
}

/// Gateway for targets with no interactive UI. Declines every request,
/// which the orchestrator reports as `Cancelled`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPrompt;

#[async_trait]
impl ReauthPrompt for NoPrompt {
    async fn collect_secret(&self) -> Option<SecretString> {
        None
    }
}

/// Non-identity profile fields persisted per user id.
///
/// `None` fields are left untouched by a merge-style upsert.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub dark_mode: Option<bool>,
    pub notifications: Option<bool>,
}

/// Per-user profile document store. Success and failure are independent of
/// the identity mutations; the orchestrator never reads it.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn upsert_profile(&self, user_id: &str, fields: &ProfileFields) -> ResultAuth<()>;
}
