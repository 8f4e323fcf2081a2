//! Settings for the terminal harness. Configuration is read from
//! `config/ecofin.toml`, overridden by `ECOFIN_*` environment variables and
//! the command-line flags.

use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/ecofin.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub email: String,
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            email: String::new(),
            level: "info".to_string(),
        }
    }
}

pub struct Overrides {
    pub config: Option<String>,
    pub base_url: Option<String>,
    pub email: Option<String>,
}

pub fn load(overrides: Overrides) -> Result<Settings, config::ConfigError> {
    let config_path = overrides.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("ECOFIN"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(base_url) = overrides.base_url {
        settings.base_url = base_url;
    }
    if let Some(email) = overrides.email {
        settings.email = email;
    }

    Ok(settings)
}
