//! Terminal deployment of the reauth prompt gateway.

use async_trait::async_trait;
use secrecy::SecretString;

use account::ReauthPrompt;

/// Collects a secret from the controlling terminal without echoing it.
/// An empty line counts as declining.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn read_secret(message: &str) -> Option<SecretString> {
        match rpassword::prompt_password(format!("{message}: ")) {
            Ok(secret) if !secret.is_empty() => Some(SecretString::from(secret)),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read secret from terminal");
                None
            }
        }
    }
}

#[async_trait]
impl ReauthPrompt for TerminalPrompt {
    async fn collect_secret(&self) -> Option<SecretString> {
        // rpassword blocks on the tty; keep it off the async workers.
        tokio::task::spawn_blocking(|| {
            Self::read_secret("Session expired, enter your current password")
        })
        .await
        .unwrap_or(None)
    }
}
