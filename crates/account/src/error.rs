//! The module contains the errors the account core can throw.
//!
//! [`RequiresFreshSession`] is the only recoverable-in-place error: the
//! orchestrator absorbs it by running the reauth sub-flow. Everything else
//! is terminal for the request that produced it.
//!
//! [`RequiresFreshSession`]: AuthError::RequiresFreshSession
use thiserror::Error;

/// Account core custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("session is stale, re-authentication required")]
    RequiresFreshSession,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("weak secret: {0}")]
    WeakSecret(String),
    #[error("email already in use: {0}")]
    EmailInUse(String),
    #[error("invalid email: {0}")]
    InvalidEmail(String),
    #[error("cancelled")]
    Cancelled,
    #[error("rate limited")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("another account mutation is in flight")]
    Busy,
}
