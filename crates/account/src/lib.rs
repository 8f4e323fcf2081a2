//! Account core of the EcoFin client.
//!
//! Business logic lives behind a hosted identity/document backend; the one
//! non-trivial piece on the client is the account-mutation orchestrator:
//! change password, change email and delete account, each of which the
//! provider may refuse until the session is re-proven fresh. The core is
//! transport-agnostic — deployments plug in an [`IdentityProvider`], a
//! [`ReauthPrompt`] and a [`ProfileStore`].

pub use auth::Authenticator;
pub use error::AuthError;
pub use identity::Identity;
pub use mutation::{MutationOutcome, MutationRequest};
pub use orchestrator::AccountOrchestrator;
pub use provider::{IdentityProvider, NoPrompt, ProfileFields, ProfileStore, ReauthPrompt};
pub use session::SessionStore;
pub use verifier::CredentialVerifier;

mod auth;
mod error;
mod identity;
mod mutation;
mod orchestrator;
mod provider;
mod session;
mod verifier;

pub type ResultAuth<T> = Result<T, AuthError>;
