mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DEFAULT_IDENTITY_FILE, DEFAULT_TIMEOUT_SECONDS, GatewaySettings, IdentitySettings,
    LoggingSettings, Settings, SettingsError,
};
