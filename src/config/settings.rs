use std::path::PathBuf;

use config::Environment as EnvironmentSource;
use config::{Config, File};
use serde::Deserialize;

use super::Environment;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_IDENTITY_FILE: &str = "userDetails.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub gateway: GatewaySettings,
    pub identity: IdentitySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySettings {
    pub submit_url: String,
    pub transcript_url: String,
    pub list_url: String,
    #[serde(default)]
    pub delete_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("environment: {0}")]
    Environment(String),
    #[error("config: {0}")]
    Config(#[from] config::ConfigError),
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Settings {
    /// Reads `.env`, then `APP_ENVIRONMENT` (default `local`), then layers
    /// `appsettings.{Env}` and `APP_*` variables.
    pub fn load() -> Result<(Self, Environment), SettingsError> {
        dotenvy::dotenv().ok();

        let environment = match std::env::var("APP_ENVIRONMENT") {
            Ok(raw) => raw.parse().map_err(SettingsError::Environment)?,
            Err(_) => Environment::default(),
        };

        let settings = Self::load_for(environment)?;
        Ok((settings, environment))
    }

    /// Nested keys use a double underscore, e.g.
    /// `APP_GATEWAY__SUBMIT_URL`.
    pub fn load_for(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .set_default("gateway.timeout_seconds", DEFAULT_TIMEOUT_SECONDS as i64)?
            .set_default("identity.path", DEFAULT_IDENTITY_FILE)?
            .set_default("logging.level", "warn")?
            .set_default("logging.json", environment.json_logs_by_default())?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(configuration.try_deserialize()?)
    }
}
