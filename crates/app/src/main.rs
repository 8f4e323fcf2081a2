use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use secrecy::SecretString;

use account::{AccountOrchestrator, Authenticator, SessionStore};
use client::BackendClient;
use prompt::TerminalPrompt;

mod prompt;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "ecofin", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override backend base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override account email (passwords are never read from CLI).
    #[arg(long)]
    email: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and sign in.
    SignUp {
        #[arg(long)]
        display_name: Option<String>,
    },
    /// Change the account password.
    ChangePassword,
    /// Change the account email.
    ChangeEmail { new_email: String },
    /// Delete the account permanently.
    DeleteAccount,
    /// Send a password reset email.
    ResetPassword,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let settings = settings::load(settings::Overrides {
        config: args.config,
        base_url: args.base_url,
        email: args.email,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ecofin={level},account={level},client={level}",
            level = settings.level
        ))
        .init();

    if settings.email.is_empty() {
        return Err("email is required (--email or config/ecofin.toml)".into());
    }

    let provider = Arc::new(BackendClient::new(&settings.base_url)?);
    let session = SessionStore::new();
    let auth = Authenticator::new(provider.clone(), provider.clone(), session.clone());
    let orchestrator = AccountOrchestrator::new(provider, Arc::new(TerminalPrompt), session);

    match args.command {
        Command::SignUp { display_name } => {
            let secret = read_secret("Choose a password")?;
            let identity = auth
                .sign_up(&settings.email, &secret, display_name.as_deref())
                .await?;
            println!("signed up as {} ({})", identity.email, identity.user_id);
        }
        Command::ChangePassword => {
            let current = read_secret("Current password")?;
            auth.sign_in(&settings.email, &current).await?;
            let new = read_secret("New password")?;
            orchestrator.change_password(current, new).await?;
            println!("password changed");
        }
        Command::ChangeEmail { new_email } => {
            let secret = read_secret("Password")?;
            auth.sign_in(&settings.email, &secret).await?;
            orchestrator.change_email(&new_email).await?;
            println!("email changed to {new_email}");
        }
        Command::DeleteAccount => {
            if !confirm("This permanently deletes your account. Continue? [y/N] ")? {
                println!("aborted");
                return Ok(());
            }
            let secret = read_secret("Password")?;
            auth.sign_in(&settings.email, &secret).await?;
            orchestrator.delete_account().await?;
            println!("account deleted");
        }
        Command::ResetPassword => {
            auth.send_secret_reset_email(&settings.email).await?;
            println!("reset email sent to {}", settings.email);
        }
    }

    Ok(())
}

fn read_secret(message: &str) -> Result<SecretString, Box<dyn std::error::Error + Send + Sync>> {
    TerminalPrompt::read_secret(message).ok_or_else(|| "a password is required".into())
}

fn confirm(message: &str) -> Result<bool, std::io::Error> {
    print!("{message}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
