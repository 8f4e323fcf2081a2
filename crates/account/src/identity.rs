//! The authenticated identity.
//!
//! An [`Identity`] is an immutable snapshot: consumers get a clone and the
//! [`SessionStore`] only ever swaps in a fully-formed new value. The two
//! sanctioned replacements are a bumped freshness timestamp after a
//! successful re-authentication and a new email after a successful
//! ChangeEmail.
//!
//! [`SessionStore`]: crate::SessionStore

use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// Opaque stable id minted by the identity provider.
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    /// When the current secret was last proven to the provider.
    pub verified_at: DateTime<Utc>,
}

impl Identity {
    /// Same identity with the freshness timestamp moved to `at`.
    pub fn refreshed(&self, at: DateTime<Utc>) -> Self {
        Self {
            verified_at: at,
            ..self.clone()
        }
    }

    /// Same identity with a new email; every other field is untouched.
    pub fn with_email(&self, email: &str) -> Self {
        Self {
            email: email.to_string(),
            ..self.clone()
        }
    }
}
