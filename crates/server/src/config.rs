use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration build error: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

#[derive(Clone, Deserialize)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    /// Empty username or password selects the mock mailer, which logs the
    /// send and reports success without touching the network.
    pub username: String,
    pub password: String,
    pub from: String,
    #[serde(default = "default_smtp_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Deserialize)]
pub struct WhatsAppConfig {
    /// Base URL of the templated-messaging API; `/messages` is appended.
    pub api_url: String,
    pub api_token: String,
    #[serde(default = "default_whatsapp_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_email_channel")]
    pub email_channel: String,
    #[serde(default = "default_whatsapp_channel")]
    pub whatsapp_channel: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            email_channel: default_email_channel(),
            whatsapp_channel: default_whatsapp_channel(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub smtp: SmtpConfig,
    pub whatsapp: WhatsAppConfig,
    #[serde(default)]
    pub queue: QueueConfig,
}

fn default_smtp_timeout_secs() -> u64 {
    30
}

fn default_whatsapp_timeout_secs() -> u64 {
    10
}

fn default_email_channel() -> String {
    "outreach.email".to_string()
}

fn default_whatsapp_channel() -> String {
    "outreach.whatsapp".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

/// Load application configuration from `config.yaml` + environment overrides.
///
/// Environment variable override convention: any var matching the key path
/// separated by double underscores (e.g. `SMTP__PORT`, `QUEUE__POLL_INTERVAL_MS`)
/// overrides the file value.
///
/// Returns a `ConfigError` instead of panicking so the caller can decide how to fail.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment, File};
    let cfg = Config::builder()
        .add_source(File::with_name("config.yaml"))
        .add_source(Environment::default().separator("__"))
        .build()?;

    let app: AppConfig = cfg.try_deserialize()?;
    validate(&app)?;
    Ok(app)
}

pub(crate) fn validate(app: &AppConfig) -> Result<(), ConfigError> {
    if app.smtp.port == 0 {
        return Err(ConfigError::Validation("smtp.port must be > 0".into()));
    }
    if app.queue.poll_interval_ms == 0 {
        return Err(ConfigError::Validation(
            "queue.poll_interval_ms must be > 0".into(),
        ));
    }
    if app.whatsapp.api_url.is_empty() {
        return Err(ConfigError::Validation(
            "whatsapp.api_url must not be empty".into(),
        ));
    }
    Ok(())
}

/// Convenience helper for binaries wanting panic-on-error behaviour.
pub fn load_config_or_panic() -> AppConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => panic!("Failed to load configuration: {e}"),
    }
}
