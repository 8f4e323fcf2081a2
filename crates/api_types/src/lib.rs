use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod auth {
    use super::*;

    /// Request body for `auth/sign-in` and `auth/reauth`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignUp {
        pub email: String,
        pub password: String,
        pub display_name: Option<String>,
    }

    /// Authenticated identity as the backend reports it.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IdentityView {
        /// Opaque stable id.
        pub user_id: String,
        pub email: String,
        pub display_name: Option<String>,
    }

    /// Response body for sign-in, sign-up and reauth.
    ///
    /// `token` is a bearer token scoped to the session just established;
    /// a reauth returns a fresh one.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionResponse {
        pub token: String,
        pub identity: IdentityView,
        pub issued_at: DateTime<Utc>,
    }

    /// Request body for `auth/reset`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResetRequest {
        pub email: String,
    }
}

pub mod account {
    use super::*;

    /// Request body for `account/password`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChangePassword {
        pub new_password: String,
    }

    /// Request body for `account/email`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChangeEmail {
        pub new_email: String,
    }
}

pub mod profile {
    use super::*;

    /// Merge-style profile upsert: `None` fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProfileUpsert {
        pub display_name: Option<String>,
        pub phone: Option<String>,
        pub avatar_url: Option<String>,
        pub prefs: Option<Preferences>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Preferences {
        pub dark_mode: Option<bool>,
        pub notifications: Option<bool>,
    }
}

pub mod error {
    use super::*;

    /// Error body returned by the backend on a non-2xx status.
    ///
    /// `code` is a stable machine-readable string (for example
    /// `requires-fresh-session` or `wrong-password`); `error` is the
    /// human-readable message.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
        pub code: Option<String>,
    }
}
