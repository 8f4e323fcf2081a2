//! HTTP client for the hosted EcoFin backend.
//!
//! One possible deployment of the account seams: implements
//! [`IdentityProvider`] and [`ProfileStore`] over REST. A bearer token is
//! established by sign-in/sign-up, replaced by a fresh one on
//! re-authentication and dropped on sign-out or account deletion. Backend
//! error bodies are mapped into the core taxonomy here so the orchestrator
//! never inspects transport details.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use account::{
    AuthError, Identity, IdentityProvider, ProfileFields, ProfileStore, ResultAuth,
};
use api_types::{
    account::{ChangeEmail, ChangePassword},
    auth::{Credentials, ResetRequest, SessionResponse, SignUp},
    error::ErrorResponse,
    profile::{Preferences, ProfileUpsert},
};

#[derive(Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<String>>,
}

impl BackendClient {
    pub fn new(base_url: &str) -> ResultAuth<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AuthError::Network(format!("invalid base_url: {err}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: RwLock::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> ResultAuth<Url> {
        self.base_url
            .join(path)
            .map_err(|err| AuthError::Network(format!("invalid endpoint {path}: {err}")))
    }

    fn bearer(&self) -> ResultAuth<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(AuthError::NotAuthenticated)
    }

    fn store_token(&self, token: Option<String>) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = token;
    }

    /// Sign-in, sign-up and reauth all answer with a [`SessionResponse`];
    /// the token it carries replaces the stored one.
    async fn open_session<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
    ) -> ResultAuth<SessionResponse> {
        let res = self
            .http
            .post(self.endpoint(path)?)
            .json(payload)
            .send()
            .await
            .map_err(|err| AuthError::Network(err.to_string()))?;

        if !res.status().is_success() {
            return Err(error_from_response(res).await);
        }
        let session = res
            .json::<SessionResponse>()
            .await
            .map_err(|err| AuthError::Network(err.to_string()))?;
        self.store_token(Some(session.token.clone()));
        Ok(session)
    }

    /// Token-bearing request with an empty success body.
    async fn authed<T: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        payload: Option<&T>,
    ) -> ResultAuth<()> {
        let mut req = self
            .http
            .request(method, self.endpoint(path)?)
            .bearer_auth(self.bearer()?);
        if let Some(payload) = payload {
            req = req.json(payload);
        }
        let res = req
            .send()
            .await
            .map_err(|err| AuthError::Network(err.to_string()))?;

        if res.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(res).await)
        }
    }
}

fn identity_from(session: &SessionResponse) -> Identity {
    Identity {
        user_id: session.identity.user_id.clone(),
        email: session.identity.email.clone(),
        display_name: session.identity.display_name.clone(),
        verified_at: session.issued_at,
    }
}

async fn error_from_response(res: reqwest::Response) -> AuthError {
    let status = res.status();
    let body = res.json::<ErrorResponse>().await.ok();
    map_error(status, body)
}

/// Backend `code` strings take priority (the way the original client
/// dispatched on `auth/*` codes); the status class is the fallback.
fn map_error(status: StatusCode, body: Option<ErrorResponse>) -> AuthError {
    let (message, code) = match body {
        Some(body) => (body.error, body.code),
        None => ("unknown error".to_string(), None),
    };

    if let Some(code) = code.as_deref() {
        match code {
            "requires-fresh-session" => return AuthError::RequiresFreshSession,
            "wrong-password" | "invalid-credential" => return AuthError::InvalidCredential,
            "weak-password" => return AuthError::WeakSecret(message),
            "email-in-use" => return AuthError::EmailInUse(message),
            "invalid-email" => return AuthError::InvalidEmail(message),
            "rate-limited" => return AuthError::RateLimited,
            other => tracing::debug!(code = other, "unrecognized backend error code"),
        }
    }

    match status.as_u16() {
        401 => AuthError::InvalidCredential,
        403 => AuthError::NotAuthenticated,
        409 => AuthError::EmailInUse(message),
        422 => AuthError::InvalidEmail(message),
        428 => AuthError::RequiresFreshSession,
        429 => AuthError::RateLimited,
        _ => AuthError::Network(format!("{status}: {message}")),
    }
}

#[async_trait]
impl IdentityProvider for BackendClient {
    async fn sign_in(&self, email: &str, secret: &SecretString) -> ResultAuth<Identity> {
        let payload = Credentials {
            email: email.to_string(),
            password: secret.expose_secret().to_string(),
        };
        let session = self.open_session("auth/sign-in", &payload).await?;
        Ok(identity_from(&session))
    }

    async fn sign_up(
        &self,
        email: &str,
        secret: &SecretString,
        display_name: Option<&str>,
    ) -> ResultAuth<Identity> {
        let payload = SignUp {
            email: email.to_string(),
            password: secret.expose_secret().to_string(),
            display_name: display_name.map(str::to_string),
        };
        let session = self.open_session("auth/sign-up", &payload).await?;
        Ok(identity_from(&session))
    }

    async fn reauthenticate(&self, email: &str, secret: &SecretString) -> ResultAuth<()> {
        let payload = Credentials {
            email: email.to_string(),
            password: secret.expose_secret().to_string(),
        };
        self.open_session("auth/reauth", &payload).await?;
        Ok(())
    }

    async fn change_secret(&self, new_secret: &SecretString) -> ResultAuth<()> {
        let payload = ChangePassword {
            new_password: new_secret.expose_secret().to_string(),
        };
        self.authed(reqwest::Method::POST, "account/password", Some(&payload))
            .await
    }

    async fn change_email(&self, new_email: &str) -> ResultAuth<()> {
        let payload = ChangeEmail {
            new_email: new_email.to_string(),
        };
        self.authed(reqwest::Method::POST, "account/email", Some(&payload))
            .await
    }

    async fn delete_account(&self) -> ResultAuth<()> {
        self.authed::<()>(reqwest::Method::DELETE, "account", None)
            .await?;
        self.store_token(None);
        Ok(())
    }

    async fn send_secret_reset_email(&self, email: &str) -> ResultAuth<()> {
        let payload = ResetRequest {
            email: email.to_string(),
        };
        let res = self
            .http
            .post(self.endpoint("auth/reset")?)
            .json(&payload)
            .send()
            .await
            .map_err(|err| AuthError::Network(err.to_string()))?;

        if res.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(res).await)
        }
    }

    async fn sign_out(&self) -> ResultAuth<()> {
        // Sessions are bearer-token scoped; signing out is dropping the
        // token, there is no server round-trip to make.
        self.store_token(None);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for BackendClient {
    async fn upsert_profile(&self, user_id: &str, fields: &ProfileFields) -> ResultAuth<()> {
        let prefs = (fields.dark_mode.is_some() || fields.notifications.is_some()).then(|| {
            Preferences {
                dark_mode: fields.dark_mode,
                notifications: fields.notifications,
            }
        });
        let payload = ProfileUpsert {
            display_name: fields.display_name.clone(),
            phone: fields.phone.clone(),
            avatar_url: fields.avatar_url.clone(),
            prefs,
        };
        self.authed(
            reqwest::Method::PATCH,
            &format!("profiles/{user_id}"),
            Some(&payload),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(code: Option<&str>) -> Option<ErrorResponse> {
        Some(ErrorResponse {
            error: "message".to_string(),
            code: code.map(str::to_string),
        })
    }

    #[test]
    fn code_strings_take_priority_over_status() {
        assert_eq!(
            map_error(StatusCode::UNAUTHORIZED, body(Some("requires-fresh-session"))),
            AuthError::RequiresFreshSession
        );
        assert_eq!(
            map_error(StatusCode::BAD_REQUEST, body(Some("wrong-password"))),
            AuthError::InvalidCredential
        );
        assert_eq!(
            map_error(StatusCode::BAD_REQUEST, body(Some("weak-password"))),
            AuthError::WeakSecret("message".to_string())
        );
        assert_eq!(
            map_error(StatusCode::CONFLICT, body(Some("email-in-use"))),
            AuthError::EmailInUse("message".to_string())
        );
    }

    #[test]
    fn status_fallback_when_code_is_missing() {
        assert_eq!(
            map_error(StatusCode::UNAUTHORIZED, body(None)),
            AuthError::InvalidCredential
        );
        assert_eq!(
            map_error(StatusCode::PRECONDITION_REQUIRED, body(None)),
            AuthError::RequiresFreshSession
        );
        assert_eq!(
            map_error(StatusCode::TOO_MANY_REQUESTS, body(None)),
            AuthError::RateLimited
        );
        assert_eq!(
            map_error(StatusCode::UNPROCESSABLE_ENTITY, body(None)),
            AuthError::InvalidEmail("message".to_string())
        );
    }

    #[test]
    fn unparseable_body_maps_to_network() {
        assert_eq!(
            map_error(StatusCode::INTERNAL_SERVER_ERROR, None),
            AuthError::Network("500 Internal Server Error: unknown error".to_string())
        );
    }

    #[test]
    fn unknown_code_falls_back_to_status() {
        assert_eq!(
            map_error(StatusCode::UNAUTHORIZED, body(Some("something-new"))),
            AuthError::InvalidCredential
        );
    }
}
