use lettre::message::Mailbox;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration build error: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

#[derive(Deserialize)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. "Maintenance Desk <alerts@example.com>".
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertsConfig {
    /// Scheduler period between runs, in seconds.
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// Bound on each individual notification send, in seconds.
    #[serde(default = "default_dispatch_timeout_secs")]
    pub dispatch_timeout_secs: u64,
    /// Dispatch workers in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Suppression window for repeat alerts of the same severity, in hours.
    #[serde(default = "default_reminder_interval_hours")]
    pub reminder_interval_hours: u64,
    /// Optional bound on total run duration, in seconds.
    #[serde(default)]
    pub run_deadline_secs: Option<u64>,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval_secs(),
            dispatch_timeout_secs: default_dispatch_timeout_secs(),
            max_concurrency: default_max_concurrency(),
            reminder_interval_hours: default_reminder_interval_hours(),
            run_deadline_secs: None,
        }
    }
}

fn default_check_interval_secs() -> u64 {
    300
}

fn default_dispatch_timeout_secs() -> u64 {
    30
}

fn default_max_concurrency() -> usize {
    8
}

fn default_reminder_interval_hours() -> u64 {
    24
}

#[derive(Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

pub fn validate(app: &AppConfig) -> Result<(), ConfigError> {
    if app.smtp.port == 0 {
        return Err(ConfigError::Validation("smtp.port must be > 0".into()));
    }
    if app.smtp.from.parse::<Mailbox>().is_err() {
        return Err(ConfigError::Validation(format!(
            "smtp.from is not a valid mailbox: '{}'",
            app.smtp.from
        )));
    }
    if app.alerts.max_concurrency == 0 {
        return Err(ConfigError::Validation(
            "alerts.max_concurrency must be > 0".into(),
        ));
    }
    if app.alerts.dispatch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "alerts.dispatch_timeout_secs must be > 0".into(),
        ));
    }
    if app.alerts.check_interval_secs == 0 {
        return Err(ConfigError::Validation(
            "alerts.check_interval_secs must be > 0".into(),
        ));
    }
    Ok(())
}

/// Load application configuration from `config.yaml` + environment overrides.
///
/// Environment variable override convention: any var matching the key path
/// separated by double underscores (e.g. `SMTP__PORT`) overrides the file
/// value.
///
/// Returns a `ConfigError` instead of panicking so the caller can decide how
/// to fail.
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

/// Convenience helper for binaries wanting panic-on-error behaviour.
pub fn load_config_or_panic() -> AppConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => panic!("Failed to load configuration: {e}"),
    }
}
