//! Account mutation requests and their outcomes.

use secrecy::SecretString;

use crate::AuthError;

/// One of the three sensitive account operations. Constructed by the
/// caller, consumed exactly once by the orchestrator, never persisted.
#[derive(Debug)]
pub enum MutationRequest {
    ChangePassword {
        current: SecretString,
        new: SecretString,
    },
    ChangeEmail {
        new_email: String,
    },
    DeleteAccount,
}

impl MutationRequest {
    /// Stable label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChangePassword { .. } => "change_password",
            Self::ChangeEmail { .. } => "change_email",
            Self::DeleteAccount => "delete_account",
        }
    }
}

/// Per-step outcome of a mutation attempt.
///
/// `NeedsSecret` is internal to the reauth sub-flow: an attempt hit the
/// provider's stale-session refusal. Terminal outcomes are only `Success`
/// and `Failed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    Success,
    NeedsSecret,
    Failed(AuthError),
}

impl MutationOutcome {
    /// Collapses the outcome into a `Result` for callers that do not care
    /// about the step structure.
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Self::Success => Ok(()),
            Self::NeedsSecret => Err(AuthError::RequiresFreshSession),
            Self::Failed(err) => Err(err),
        }
    }
}
